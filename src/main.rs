use std::env;
use std::path::Path;
use std::process;

use trash_rs::prelude::*;

const USAGE: &str = "\
Usage: trash [FILE]...

Move each FILE into the per-user trash instead of deleting it.

Options:
  -h, --help    show this help message and exit";

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return;
    }
    if args.is_empty() {
        eprintln!("trash: missing operand");
        eprintln!("{USAGE}");
        process::exit(1);
    }

    let environ: EnvVarMap = env::vars().collect();
    let fs = RealFileSystem;

    let trash_dir = match TrashDirectory::from_env(&environ) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("trash: {err}");
            process::exit(1);
        }
    };
    if let Err(err) = trash_dir.prepare(&fs) {
        eprintln!("trash: {err}");
        process::exit(1);
    }

    // One deletion timestamp for the whole batch.
    let now = serialize_deletion_time(fs.now());

    let mut success = true;
    for arg in &args {
        let path = Path::new(arg);
        if let Err(err) = trash_one(&fs, path, &trash_dir, &now) {
            eprintln!("trash: {}: {err}", sanitize_user_path(path));
            success = false;
        }
    }
    if !success {
        process::exit(1);
    }
}
