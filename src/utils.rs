use crate::error::Error;
use std::process;

pub(crate) fn run(mut command: process::Command) -> Result<String, Error> {
    log::debug!("Running {command:?}");
    let output = command.output().map_err(|source| Error::Spawn {
        command: format!("{command:?}"),
        source,
    })?;

    log::debug!("Output: {output:?}");

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: format!("{command:?}"),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| Error::InvalidUtf8 {
        command: format!("{command:?}"),
    })
}

#[cfg(test)]
pub(crate) fn assert_command_eq(
    actual: &std::process::Command,
    expected_program: &str,
    expected_args: &[&str],
) {
    assert_eq!(
        actual
            .get_program()
            .to_str()
            .expect("program name is not valid utf-8"),
        expected_program
    );

    let actual_args: Vec<&str> = actual
        .get_args()
        .map(|arg| arg.to_str().expect("argument is not valid utf-8"))
        .collect();

    assert_eq!(actual_args, expected_args);
}
