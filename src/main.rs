fn main() {
    if let Err(e) = intl_preferences::cli::main() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
