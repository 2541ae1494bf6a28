fn main() {
    if let Err(e) = approxbench::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
