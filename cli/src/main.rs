use std::{env, io, process};

use interpreter::Session;

fn main() {
    let mut session = Session::new();
    let result = if env::args().len() > 1 {
        let lines = env::args().skip(1).collect::<Vec<_>>().join("\n");
        session.run(lines.as_bytes(), io::stdout().lock())
    } else {
        session.run(io::stdin().lock(), io::stdout().lock())
    };
    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
