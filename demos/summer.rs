use flagbind::{FlagParser, IntOptions, Nargs};

fn main() {
    let mut items: Vec<i64> = Vec::default();
    let mut parser = FlagParser::new("summer").about("Sums its arguments.");
    parser
        .int_var(
            &mut items,
            "item",
            "The items to sum.",
            IntOptions {
                required: true,
                nargs: Nargs::Unbounded,
                ..IntOptions::default()
            },
        )
        .expect("the parser configuration must be valid");

    // The default callbacks exit the process on a parse error or help request.
    let remaining = parser.parse_env().unwrap_or_default();
    drop(parser);

    if !remaining.is_empty() {
        println!("Ignoring: {}", remaining.join(" "));
    }

    println!("Sum: {}", items.iter().sum::<i64>());
}
