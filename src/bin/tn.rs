//! Short binary name (`tn`) that forwards to the `tenote` library.

fn main() {
    if let Err(err) = tenote::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
