//! Token grammar of recorded installer commands
//!
//! The installer writes its argv joined by single spaces, so tokens arrive
//! already split on whitespace. Only the parts that identify what was
//! installed are kept: package specs and channels. Flags that take a value
//! consume it (either the next token or an inline `=value`); every other flag
//! is a switch and is skipped. Short flags may be bundled (`-yc conda-forge`)
//! and carry an attached value (`-cbioconda`, `-c=bioconda`).

/// Long flags whose value is the following token
const VALUE_FLAGS: &[&str] = &[
    "--name",
    "--prefix",
    "--channel",
    "--file",
    "--clone",
    "--revision",
    "--repodata-fn",
    "--subdir",
    "--platform",
    "--solver",
    "--experimental",
];

/// Flags that install packages not spelled out on the command line
const SOURCE_FLAGS: &[&str] = &["--file", "--clone", "--revision"];

/// Arguments recovered from one recorded command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedArgs {
    pub packages: Vec<String>,
    pub channels: Vec<String>,
    pub name: Option<String>,
    pub prefix: Option<String>,

    /// Flag that pulled packages from elsewhere (`--file`, `--clone`, `--revision`)
    pub package_source: Option<String>,
}

impl RecordedArgs {
    fn set(&mut self, flag: &str, value: &str) {
        match flag {
            "-c" | "--channel" => self.channels.push(value.to_string()),
            "-n" | "--name" => self.name = Some(value.to_string()),
            "-p" | "--prefix" => self.prefix = Some(value.to_string()),
            flag if SOURCE_FLAGS.contains(&flag) => {
                self.package_source.get_or_insert_with(|| flag.to_string());
            }
            _ => {}
        }
    }
}

/// Long spelling of a short flag that takes a value
fn short_value_flag(letter: char) -> Option<&'static str> {
    match letter {
        'n' => Some("-n"),
        'p' => Some("-p"),
        'c' => Some("-c"),
        _ => None,
    }
}

/// Parse the tokens following the subcommand of a recorded command
pub fn parse_tokens<'a, I>(tokens: I) -> RecordedArgs
where
    I: IntoIterator<Item = &'a str>,
{
    let mut args = RecordedArgs::default();
    let mut tokens = tokens.into_iter();
    let mut positional_only = false;

    while let Some(token) = tokens.next() {
        if positional_only || !token.starts_with('-') || token == "-" {
            args.packages.push(token.to_string());
            continue;
        }
        if token == "--" {
            positional_only = true;
            continue;
        }

        if token.starts_with("--") {
            if let Some((flag, value)) = token.split_once('=') {
                args.set(flag, value);
            } else if VALUE_FLAGS.contains(&token) {
                if let Some(value) = tokens.next() {
                    args.set(token, value);
                }
            }
            continue;
        }

        parse_short_cluster(&token[1..], &mut tokens, &mut args);
    }

    args
}

/// Parse the letters after a single `-`
///
/// Letters are switches up to the first one that takes a value; the rest of
/// the token (minus one leading `=`) is that value, or the next token when
/// nothing is attached.
fn parse_short_cluster<'a, I>(cluster: &str, tokens: &mut I, args: &mut RecordedArgs)
where
    I: Iterator<Item = &'a str>,
{
    for (index, letter) in cluster.char_indices() {
        let Some(flag) = short_value_flag(letter) else {
            continue;
        };
        let attached = &cluster[index + letter.len_utf8()..];
        let attached = attached.strip_prefix('=').unwrap_or(attached);
        if attached.is_empty() {
            if let Some(value) = tokens.next() {
                args.set(flag, value);
            }
        } else {
            args.set(flag, attached);
        }
        return;
    }
}
