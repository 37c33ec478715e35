//! `#!conda-shell` directive parsing
//!
//! A script run through conda-shell starts with an interpreter line followed
//! by one or more directive lines:
//!
//! ```text
//! #!/usr/bin/env conda-shell
//! #!conda-shell -i python python=3.6 numpy=1.12
//! #!conda-shell -c conda-forge pydap
//! ```
//!
//! Each directive becomes one install step, in file order. The first step
//! creates the environment and must pick the interpreter; later steps install
//! into the same environment and may only repeat that interpreter.

use std::fs;
use std::path::Path;

use clap::Parser;

use crate::cli::ShellArgs;
use crate::domain::{InstallRequest, StepPackages};
use crate::error::{Result, ShellError, directive};

/// Program name a directive line must name
pub const DIRECTIVE_NAME: &str = "conda-shell";

/// Clap entry point for the tokens of one directive line
#[derive(Parser, Debug)]
#[command(
    name = "conda-shell",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct DirectiveArgs {
    #[command(flatten)]
    shell: ShellArgs,
}

/// Return the argument text of a directive line, or `None` if `line` is not one
///
/// Matches `#!`, optional whitespace, `conda-shell`, then whitespace or the end
/// of the line.
pub fn directive_arguments(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("#!")?.trim_start();
    let rest = rest.strip_prefix(DIRECTIVE_NAME)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Parse the argument text of one directive with the install grammar
pub fn parse_directive(line: &str, arguments: &str) -> Result<ShellArgs> {
    let tokens =
        shlex::split(arguments).ok_or_else(|| directive::malformed(line, "unbalanced quotes"))?;

    DirectiveArgs::try_parse_from(tokens)
        .map(|parsed| parsed.shell)
        .map_err(|e| {
            let rendered = e.to_string();
            let reason = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            directive::malformed(line, reason)
        })
}

/// Read `script` and build the install request its directives describe
pub fn parse_script(script: &Path, env_name: impl Into<String>) -> Result<InstallRequest> {
    let bytes =
        fs::read(script).map_err(|e| directive::script_read_failed(display(script), e.to_string()))?;
    let source = String::from_utf8_lossy(&bytes);
    parse_source(&source, &display(script), env_name)
}

/// Build the install request described by the directives in `source`
///
/// `script` is the path the interpreter will be given; it becomes part of the
/// run command shared by every step.
pub fn parse_source(
    source: &str,
    script: &str,
    env_name: impl Into<String>,
) -> Result<InstallRequest> {
    let mut interpreter: Option<String> = None;
    let mut steps = Vec::new();

    // The first line is the interpreter line that brought us here.
    for line in source.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let Some(arguments) = directive_arguments(line) else {
            break;
        };

        let args = parse_directive(line, arguments)?;
        if args.name.is_some() {
            return Err(ShellError::NameInDirective {
                line: line.to_string(),
            });
        }
        if args.run.is_some() {
            return Err(ShellError::RunInDirective {
                line: line.to_string(),
            });
        }

        if let Some(current) = &interpreter {
            if let Some(selected) = args.interpreter {
                if selected != *current {
                    return Err(directive::conflicting_interpreter(current.as_str(), selected));
                }
            }
        } else {
            let selected = args.interpreter.ok_or_else(|| ShellError::MissingInterpreter {
                script: script.to_string(),
            })?;
            interpreter = Some(selected);
        }

        tracing::debug!(line, "parsed conda-shell directive");
        steps.push(StepPackages::new(args.packages, args.channels));
    }

    let Some(interpreter) = interpreter else {
        return Err(ShellError::NoDirectives {
            script: script.to_string(),
        });
    };

    let quoted_script = shlex::try_quote(script)
        .map_err(|e| directive::malformed(script, e.to_string()))?;
    let run_command = format!("{interpreter} {quoted_script}");

    InstallRequest::new(env_name, Some(interpreter), Some(run_command), steps)
}

/// Whether `path` is an executable regular file, i.e. a shebang invocation target
pub fn is_executable_script(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StepRole;

    const ENV: &str = "shell_0123";

    fn parse(source: &str) -> Result<InstallRequest> {
        parse_source(source, "/tmp/script.py", ENV)
    }

    #[test]
    fn test_directive_arguments() {
        assert_eq!(
            directive_arguments("#!conda-shell -i python numpy"),
            Some("-i python numpy")
        );
        assert_eq!(
            directive_arguments("#! conda-shell   pydap  "),
            Some("pydap")
        );
        assert_eq!(directive_arguments("#!conda-shell"), Some(""));
        assert_eq!(directive_arguments("#!conda-shellx numpy"), None);
        assert_eq!(directive_arguments("#!/usr/bin/env conda-shell"), None);
        assert_eq!(directive_arguments("# conda-shell numpy"), None);
    }

    #[test]
    fn test_two_directives() {
        let request = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell -i python python=3.6 numpy=1.12\n\
             #!conda-shell -c conda-forge pydap\n\
             \n\
             import numpy as np\n",
        )
        .unwrap();

        assert_eq!(request.step_count(), 2);
        let create = request.create_step();
        assert_eq!(create.role(), StepRole::Create);
        assert_eq!(create.packages(), ["python=3.6", "numpy=1.12"]);
        assert!(create.channels().is_empty());

        let install = &request.install_steps()[0];
        assert_eq!(install.role(), StepRole::Install);
        assert_eq!(install.packages(), ["pydap"]);
        assert_eq!(install.channels(), ["conda-forge"]);

        for spec in request.steps() {
            assert_eq!(spec.env_name(), ENV);
            assert_eq!(spec.interpreter(), Some("python"));
            assert_eq!(spec.run_command(), Some("python /tmp/script.py"));
        }
    }

    #[test]
    fn test_scanning_stops_at_first_other_line() {
        let request = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell -i python python=3.6\n\
             import sys\n\
             #!conda-shell numpy\n",
        )
        .unwrap();
        assert_eq!(request.step_count(), 1);
    }

    #[test]
    fn test_blank_lines_between_directives_are_skipped() {
        let request = parse(
            "#!/usr/bin/env conda-shell\n\
             \n\
             #!conda-shell -i python python=3.6\n\
             \n\
             #!conda-shell numpy\n",
        )
        .unwrap();
        assert_eq!(request.step_count(), 2);
    }

    #[test]
    fn test_first_line_is_never_a_directive() {
        let result = parse("#!conda-shell -i python numpy\nprint(1)\n");
        assert!(matches!(result, Err(ShellError::NoDirectives { .. })));
    }

    #[test]
    fn test_missing_interpreter() {
        let result = parse("#!/usr/bin/env conda-shell\n#!conda-shell python=3.6 numpy=1.12\n");
        assert!(matches!(result, Err(ShellError::MissingInterpreter { .. })));
    }

    #[test]
    fn test_interpreter_only_in_later_directive_is_missing() {
        let result = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell python=3.6\n\
             #!conda-shell -i python numpy\n",
        );
        assert!(matches!(result, Err(ShellError::MissingInterpreter { .. })));
    }

    #[test]
    fn test_conflicting_interpreters() {
        let result = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell -i python3 python=3.6 numpy=1.12\n\
             #!conda-shell -i python2 bzip2 gzip\n",
        );
        match result {
            Err(ShellError::ConflictingInterpreter { first, second }) => {
                assert_eq!(first, "python3");
                assert_eq!(second, "python2");
            }
            other => panic!("Expected ConflictingInterpreter, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_identical_interpreter_is_allowed() {
        let request = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell -i python python=3.6\n\
             #!conda-shell --interpreter python numpy\n",
        )
        .unwrap();
        assert_eq!(request.interpreter(), Some("python"));
    }

    #[test]
    fn test_name_is_forbidden() {
        let result = parse(
            "#!/usr/bin/env conda-shell\n#!conda-shell -i python -n test_env python=3.6\n",
        );
        assert!(matches!(result, Err(ShellError::NameInDirective { .. })));
    }

    #[test]
    fn test_run_is_forbidden() {
        let result = parse(
            "#!/usr/bin/env conda-shell\n#!conda-shell python=3.6 numpy=1.12 --run \"print(1)\"\n",
        );
        assert!(matches!(result, Err(ShellError::RunInDirective { .. })));
    }

    #[test]
    fn test_run_with_interpreter_is_malformed() {
        let result = parse(
            "#!/usr/bin/env conda-shell\n\
             #!conda-shell -i python python=3.6 --run \"print(1)\"\n",
        );
        match result {
            Err(ShellError::MalformedDirective { reason, .. }) => {
                assert!(reason.contains("cannot be used with"), "reason: {reason}");
            }
            other => panic!("Expected MalformedDirective, got {other:?}"),
        }
    }

    #[test]
    fn test_unbalanced_quotes_are_malformed() {
        let result = parse("#!/usr/bin/env conda-shell\n#!conda-shell -i 'python numpy\n");
        assert!(matches!(result, Err(ShellError::MalformedDirective { .. })));
    }

    #[test]
    fn test_script_path_with_spaces_is_quoted() {
        let request = parse_source(
            "#!/usr/bin/env conda-shell\n#!conda-shell -i python numpy\n",
            "/tmp/my script.py",
            ENV,
        )
        .unwrap();
        assert_eq!(request.run_command(), Some("python '/tmp/my script.py'"));
    }

    #[test]
    fn test_parse_script_from_file() {
        let temp = crate::test_fixtures::create_temp_dir();
        let script = temp.path().join("script.py");
        fs::write(
            &script,
            "#!/usr/bin/env conda-shell\n#!conda-shell -i python python=3.6\nprint(1)\n",
        )
        .unwrap();

        let request = parse_script(&script, ENV).unwrap();
        assert_eq!(request.create_step().packages(), ["python=3.6"]);
        assert!(
            request
                .run_command()
                .is_some_and(|cmd| cmd.ends_with("script.py"))
        );
    }

    #[test]
    fn test_parse_script_missing_file() {
        let result = parse_script(Path::new("/nonexistent/script.py"), ENV);
        assert!(matches!(result, Err(ShellError::ScriptReadFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_script() {
        use std::os::unix::fs::PermissionsExt;

        let temp = crate::test_fixtures::create_temp_dir();
        let script = temp.path().join("script.py");
        fs::write(&script, "#!/usr/bin/env conda-shell\n").unwrap();
        assert!(!is_executable_script(&script));

        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable_script(&script));
        assert!(!is_executable_script(temp.path()));
        assert!(!is_executable_script(&temp.path().join("missing")));
    }
}
