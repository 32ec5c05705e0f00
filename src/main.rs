fn main() {
    std::process::exit(tsclientgen::run_cli(std::env::args().collect()));
}
