#[macro_use]
extern crate assert_matches;

use std::cell::RefCell;
use std::rc::Rc;

use flagbind::*;

fn quiet<'a>(parser: FlagParser<'a>) -> FlagParser<'a> {
    parser.on_error(|_, _| {}).on_help(|_| {})
}

#[test]
fn integer_with_choices() {
    let mut integer: i64 = 0;
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .int_var(
            &mut integer,
            "--integer",
            "An integer.",
            IntOptions {
                short: Some("-i".to_string()),
                choices: vec![1, 2, 3, 4],
                ..IntOptions::default()
            },
        )
        .unwrap();

    assert_matches!(
        parser.parse(&["-i", "5"]),
        Err(ParseError::ValueNotInChoices { .. })
    );
    let remaining = parser.parse(&["-i", "2", "extra"]).unwrap();
    drop(parser);

    assert_eq!(remaining, vec!["extra"]);
    assert_eq!(integer, 2);
}

#[test]
fn mixed_program() {
    let mut verbose = false;
    let mut level: i64 = 0;
    let mut tags: Vec<String> = Vec::default();
    let mut source = String::default();
    let mut targets: Vec<String> = Vec::default();
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .bool_var(
            &mut verbose,
            "--verbose",
            "Talk more.",
            BoolOptions {
                short: Some("-v".to_string()),
                ..BoolOptions::default()
            },
        )
        .unwrap();
    parser
        .int_var(
            &mut level,
            "--level",
            "The level.",
            IntOptions {
                default: Some(3),
                ..IntOptions::default()
            },
        )
        .unwrap();
    parser
        .text_var(
            &mut tags,
            "--tag",
            "A pair of tags.",
            TextOptions {
                short: Some("-t".to_string()),
                nargs: Nargs::try_from(2).unwrap(),
                ..TextOptions::default()
            },
        )
        .unwrap();
    parser
        .text_var(&mut source, "source", "Where from.", TextOptions::default())
        .unwrap();
    parser
        .text_var(
            &mut targets,
            "target",
            "Where to.",
            TextOptions {
                nargs: Nargs::try_from(-1).unwrap(),
                ..TextOptions::default()
            },
        )
        .unwrap();

    let remaining = parser
        .parse(&["src", "-t=a", "b", "dst1", "-v", "dst2", "--", "--level"])
        .unwrap();
    drop(parser);

    assert_eq!(remaining, Vec::<String>::default());
    assert!(verbose);
    assert_eq!(level, 3);
    assert_eq!(tags, vec!["a", "b"]);
    assert_eq!(source, "src");
    assert_eq!(targets, vec!["dst1", "dst2", "--level"]);
}

#[test]
fn help_beats_missing_required() {
    let helped = Rc::new(RefCell::new(String::default()));
    let helped_clone = helped.clone();
    let mut name = String::default();
    let mut parser = FlagParser::new("program")
        .on_error(|_, _| panic!("help must be recognized first"))
        .on_help(move |printer| helped_clone.borrow_mut().push_str(&printer.render()));
    parser
        .text_var(
            &mut name,
            "--name",
            "Your name.",
            TextOptions {
                required: true,
                ..TextOptions::default()
            },
        )
        .unwrap();

    assert_matches!(parser.parse(&["-h"]), Err(ParseError::HelpRequested));
    assert!(helped.borrow().starts_with("usage: program [-h] --name NAME"));
}

#[test]
fn help_as_flag_value() {
    let mut name = String::default();
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .text_var(&mut name, "--name", "", TextOptions::default())
        .unwrap();

    assert_eq!(
        parser.parse(&["--name", "--help"]).unwrap(),
        Vec::<String>::default()
    );
    drop(parser);

    assert_eq!(name, "--help");
}

#[test]
fn positional_by_keyword() {
    let mut first: i64 = 0;
    let mut second: i64 = 0;
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .int_var(&mut first, "first", "", IntOptions::default())
        .unwrap();
    parser
        .int_var(&mut second, "second", "", IntOptions::default())
        .unwrap();

    let remaining = parser.parse(&["7", "second=0b11"]).unwrap();
    drop(parser);

    assert_eq!(remaining, Vec::<String>::default());
    assert_eq!(first, 7);
    assert_eq!(second, 3);
}

#[test]
fn insufficient_arguments() {
    let mut pair: Vec<i64> = Vec::default();
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .int_var(
            &mut pair,
            "--pair",
            "",
            IntOptions {
                nargs: Nargs::Precisely(2),
                ..IntOptions::default()
            },
        )
        .unwrap();

    assert_matches!(
        parser.parse(&["--pair", "1"]),
        Err(ParseError::InsufficientArguments { expected: 2, provided: 1, .. })
    );
    assert_matches!(
        parser.parse(&["--pair="]),
        Err(ParseError::EmptyAssignedValue(name)) if name == "--pair"
    );
}

#[test]
fn missing_positional() {
    let mut items: Vec<String> = Vec::default();
    let mut parser = quiet(FlagParser::new("program"));
    parser
        .text_var(
            &mut items,
            "items",
            "",
            TextOptions {
                required: true,
                nargs: Nargs::Precisely(2),
                ..TextOptions::default()
            },
        )
        .unwrap();

    assert_matches!(
        parser.parse(empty()),
        Err(ParseError::MissingRequiredPositional(name)) if name == "items"
    );
    assert_matches!(
        parser.parse(&["a"]),
        Err(ParseError::InsufficientPositionalArguments { expected: 2, provided: 1, .. })
    );
}

fn empty() -> &'static [&'static str] {
    &[]
}

#[test]
fn configuration_errors() {
    let mut text = String::default();
    let mut flag = false;
    let mut parser = quiet(FlagParser::new("program"));

    assert_matches!(
        parser.bool_var(&mut text, "--flag", "", BoolOptions::default()),
        Err(ConfigError::UnresolvableDestination { .. })
    );
    assert_matches!(Nargs::try_from(-3), Err(ConfigError::InvalidNargs(-3)));
    parser
        .bool_var(&mut flag, "--flag", "", BoolOptions::default())
        .unwrap();
}

#[test]
fn error_callback_sees_printer() {
    let seen = Rc::new(RefCell::new(None));
    let seen_clone = seen.clone();
    let mut value: i64 = 0;
    let mut parser = FlagParser::new("checker").on_error(move |printer, error| {
        seen_clone
            .borrow_mut()
            .replace((printer.program().to_string(), error.to_string()));
    });
    parser
        .int_var(&mut value, "value", "", IntOptions::default())
        .unwrap();

    assert!(parser.parse(&["1.5"]).is_err());
    assert_eq!(
        seen.borrow().clone(),
        Some((
            "checker".to_string(),
            "cannot convert '1.5' to integer for 'value': invalid digit found in string."
                .to_string()
        ))
    );
}
