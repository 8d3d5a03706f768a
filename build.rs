fn main() {
    println!("cargo:rerun-if-env-changed=CARVIN_BOARD_CONFIG");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
