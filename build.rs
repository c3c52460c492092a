fn main() {
    slint_build::compile("ui/dialogs.slint").expect("Slint dialog compilation failed");
}
