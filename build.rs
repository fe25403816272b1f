fn main() {
    // Host builds (tests, proptest) run without the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
