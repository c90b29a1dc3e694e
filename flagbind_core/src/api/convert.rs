use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::api::capture::*;
use crate::api::handle::{Handle, OpenHandles};
use crate::model::OpenMode;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Parse a signed integer, with the radix given by its prefix.
///
/// `0x` is hexadecimal, `0o` or a bare leading `0` is octal, `0b` is binary, and anything else is decimal.
pub(crate) fn parse_int(token: &str) -> Result<i64, String> {
    let (negative, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let lowered = unsigned.to_ascii_lowercase();
    let (radix, digits) = if let Some(digits) = lowered.strip_prefix("0x") {
        (16, digits)
    } else if let Some(digits) = lowered.strip_prefix("0o") {
        (8, digits)
    } else if let Some(digits) = lowered.strip_prefix("0b") {
        (2, digits)
    } else if lowered.len() > 1 && lowered.starts_with('0') {
        (8, &lowered[1..])
    } else {
        (10, lowered.as_str())
    };

    // The sign has already been taken, so another one is a malformed token.
    if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
        return Err("invalid digit found in string".to_string());
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|error| error.to_string())?;

    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };

    value.ok_or_else(|| "number out of range for a 64 bit integer".to_string())
}

/// Parse a boolean literal, ignoring case.
pub(crate) fn parse_bool(token: &str) -> Result<bool, String> {
    match token.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err("expected one of 1, t, true, 0, f, false".to_string()),
    }
}

fn check_choices<T>(choices: &[T], value: T, token: &str) -> Result<T, InvalidCapture>
where
    T: PartialEq + std::fmt::Display,
{
    if choices.is_empty() || choices.contains(&value) {
        Ok(value)
    } else {
        Err(InvalidCapture::NotInChoices {
            token: token.to_string(),
            choices: choices
                .iter()
                .map(|choice| choice.to_string())
                .collect::<Vec<String>>()
                .join(", "),
        })
    }
}

pub(crate) struct IntConverter {
    choices: Vec<i64>,
}

impl IntConverter {
    pub(crate) fn new(choices: Vec<i64>) -> Self {
        Self { choices }
    }
}

impl Convert<i64> for IntConverter {
    fn convert(&self, token: &str) -> Result<i64, InvalidCapture> {
        let value = parse_int(token).map_err(|reason| InvalidCapture::InvalidConversion {
            token: token.to_string(),
            type_name: "integer",
            reason,
        })?;

        check_choices(&self.choices, value, token)
    }
}

pub(crate) struct TextConverter {
    choices: Vec<String>,
}

impl TextConverter {
    pub(crate) fn new(choices: Vec<String>) -> Self {
        Self { choices }
    }
}

impl Convert<String> for TextConverter {
    fn convert(&self, token: &str) -> Result<String, InvalidCapture> {
        check_choices(&self.choices, token.to_string(), token)
    }
}

pub(crate) struct BoolConverter {
    on_exist: bool,
}

impl BoolConverter {
    pub(crate) fn new(on_exist: bool) -> Self {
        Self { on_exist }
    }
}

impl Convert<bool> for BoolConverter {
    fn convert(&self, token: &str) -> Result<bool, InvalidCapture> {
        parse_bool(token).map_err(|reason| InvalidCapture::InvalidConversion {
            token: token.to_string(),
            type_name: "boolean",
            reason,
        })
    }

    fn present(&self) -> Option<bool> {
        Some(self.on_exist)
    }
}

pub(crate) struct HandleConverter {
    mode: OpenMode,
    #[cfg_attr(not(unix), allow(dead_code))]
    perms: Option<u32>,
    tracker: Option<OpenHandles>,
}

impl HandleConverter {
    pub(crate) fn new(mode: OpenMode, perms: Option<u32>, tracker: Option<OpenHandles>) -> Self {
        Self {
            mode,
            perms,
            tracker,
        }
    }

    fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();

        match self.mode {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write => {
                options.write(true).truncate(true).create(true);
            }
            OpenMode::ReadWrite => {
                options.read(true).write(true).truncate(true).create(true);
            }
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.perms.unwrap_or(crate::constant::DEFAULT_PERMS));
        }

        options
    }
}

impl Convert<Handle> for HandleConverter {
    fn convert(&self, token: &str) -> Result<Handle, InvalidCapture> {
        let file = self
            .options()
            .open(token)
            .map_err(|source| InvalidCapture::Open {
                path: token.to_string(),
                source,
            })?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Opened '{token}' with mode {mode:?}.", mode = self.mode);
        }

        let handle = Handle::new(PathBuf::from(token), self.mode, file);

        if let Some(tracker) = &self.tracker {
            tracker.track(handle.clone());
        }

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rstest::rstest;
    use std::io::{Read, Write};

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("+42", 42)]
    #[case("-42", -42)]
    #[case("0x1F", 31)]
    #[case("0X1f", 31)]
    #[case("-0x10", -16)]
    #[case("0o17", 15)]
    #[case("017", 15)]
    #[case("0b101", 5)]
    #[case("-9223372036854775808", i64::MIN)]
    #[case("9223372036854775807", i64::MAX)]
    fn int_valid(#[case] token: &str, #[case] expected: i64) {
        assert_eq!(parse_int(token).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("abc")]
    #[case("1.5")]
    #[case("0x")]
    #[case("09")]
    #[case("0b2")]
    #[case("--1")]
    #[case("+-1")]
    #[case("9223372036854775808")]
    #[case("-9223372036854775809")]
    fn int_invalid(#[case] token: &str) {
        assert!(parse_int(token).is_err(), "'{token}' should not parse");
    }

    #[rstest]
    #[case("1", true)]
    #[case("t", true)]
    #[case("TRUE", true)]
    #[case("True", true)]
    #[case("0", false)]
    #[case("F", false)]
    #[case("false", false)]
    fn bool_valid(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(token).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("yes")]
    #[case("2")]
    fn bool_invalid(#[case] token: &str) {
        assert!(parse_bool(token).is_err());
    }

    #[test]
    fn int_choices_random() {
        let mut rng = rand::thread_rng();
        let choices: Vec<i64> = (0..5).map(|_| rng.gen_range(-100..100)).collect();
        let converter = IntConverter::new(choices.clone());

        for _ in 0..100 {
            let value: i64 = rng.gen_range(-100..100);
            let result = converter.convert(&value.to_string());

            if choices.contains(&value) {
                assert_eq!(result.unwrap(), value);
            } else {
                assert_matches!(result, Err(InvalidCapture::NotInChoices { token, .. }) if token == value.to_string());
            }
        }
    }

    #[test]
    fn int_choices_unordered() {
        let converter = IntConverter::new(vec![3, 1, 2]);

        assert_eq!(converter.convert("1").unwrap(), 1);
        assert_eq!(converter.convert("0x2").unwrap(), 2);
        assert_matches!(
            converter.convert("4"),
            Err(InvalidCapture::NotInChoices { choices, .. }) if choices == "3, 1, 2"
        );
    }

    #[test]
    fn int_invalid_conversion() {
        let converter = IntConverter::new(Vec::default());

        assert_matches!(
            converter.convert("abc"),
            Err(InvalidCapture::InvalidConversion { type_name: "integer", .. })
        );
    }

    #[test]
    fn text_choices() {
        let converter = TextConverter::new(vec!["a".to_string(), "b".to_string()]);

        assert_eq!(converter.convert("a").unwrap(), "a");
        assert_matches!(converter.convert("c"), Err(InvalidCapture::NotInChoices { .. }));
        assert_eq!(
            TextConverter::new(Vec::default()).convert("-x").unwrap(),
            "-x"
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn bool_present(#[case] on_exist: bool) {
        let converter = BoolConverter::new(on_exist);

        assert_eq!(converter.present(), Some(on_exist));
        assert!(converter.convert("t").unwrap());
        assert_eq!(IntConverter::new(Vec::default()).present(), None);
    }

    fn temp_path(name: &str) -> PathBuf {
        let mut rng = rand::thread_rng();
        std::env::temp_dir().join(format!("flagbind-{name}-{}", rng.gen::<u64>()))
    }

    #[test]
    fn handle_write_then_read() {
        let path = temp_path("convert");
        let token = path.to_string_lossy().to_string();

        let mut writer = HandleConverter::new(OpenMode::Write, None, None)
            .convert(&token)
            .unwrap();
        writer.write_all(b"hello").unwrap();
        writer.close().unwrap();

        let mut reader = HandleConverter::new(OpenMode::Read, None, None)
            .convert(&token)
            .unwrap();
        let mut content = String::default();
        reader.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
        assert_eq!(reader.path(), path.as_path());

        std::fs::remove_file(path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn handle_perms() {
        use std::os::unix::fs::PermissionsExt;
        let path = temp_path("perms");
        let token = path.to_string_lossy().to_string();

        HandleConverter::new(OpenMode::Write, Some(0o600), None)
            .convert(&token)
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn handle_missing() {
        let path = temp_path("missing");

        let result = HandleConverter::new(OpenMode::Read, None, None)
            .convert(&path.to_string_lossy());

        assert_matches!(result, Err(InvalidCapture::Open { source, .. }) if source.kind() == std::io::ErrorKind::NotFound);
    }

    #[test]
    fn handle_tracked() {
        let path = temp_path("tracked");
        let tracker = OpenHandles::default();
        let converter = HandleConverter::new(OpenMode::ReadWrite, None, Some(tracker.clone()));

        let handle = converter.convert(&path.to_string_lossy()).unwrap();

        assert_eq!(tracker.len(), 1);
        assert!(handle.is_open());
        tracker.close_all().unwrap();
        assert!(!handle.is_open());
        assert!(tracker.is_empty());
        std::fs::remove_file(path).unwrap();
    }
}
