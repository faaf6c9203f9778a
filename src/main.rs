fn main() {
    if let Err(err) = tenote::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
