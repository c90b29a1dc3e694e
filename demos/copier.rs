use std::io::{Read, Write};

use flagbind::{BoolOptions, FileOptions, FlagParser, Handle, OpenMode};

fn main() {
    let mut input: Option<Handle> = None;
    let mut output: Option<Handle> = None;
    let mut upper = false;
    let mut parser = FlagParser::new("copier").about("Copies one file into another.");
    parser
        .file_var(
            &mut input,
            "source",
            "The file to read.",
            FileOptions {
                required: true,
                close_on_exit: true,
                ..FileOptions::default()
            },
        )
        .expect("the parser configuration must be valid");
    parser
        .file_var(
            &mut output,
            "--output",
            "The file to write.",
            FileOptions {
                short: Some("-o".to_string()),
                required: true,
                mode: OpenMode::Write,
                perms: Some(0o644),
                close_on_exit: true,
                ..FileOptions::default()
            },
        )
        .expect("the parser configuration must be valid");
    parser
        .bool_var(
            &mut upper,
            "--upper",
            "Upper case the copy.",
            BoolOptions {
                short: Some("-u".to_string()),
                ..BoolOptions::default()
            },
        )
        .expect("the parser configuration must be valid");

    parser.parse_env().ok();
    let open_handles = parser.open_handles();
    drop(parser);

    if let (Some(mut input), Some(mut output)) = (input, output) {
        let mut content = String::default();
        input
            .read_to_string(&mut content)
            .expect("the source must be readable");

        if upper {
            content = content.to_uppercase();
        }

        output
            .write_all(content.as_bytes())
            .expect("the output must be writable");
        println!(
            "Copied {} bytes from {} to {}.",
            content.len(),
            input.path().display(),
            output.path().display()
        );
    }

    if let Err(error) = open_handles.close_all() {
        eprintln!("Close error: {error}.");
        std::process::exit(1);
    }
}
