// src/supervisord/conf_file.rs

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::Config;

/// `autorestart=` policy of a supervisor program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoRestart {
    Always,
    Never,
    /// Restart only when the exit code is not an expected one.
    #[default]
    Unexpected,
}

impl fmt::Display for AutoRestart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AutoRestart::Always => "true",
            AutoRestart::Never => "false",
            AutoRestart::Unexpected => "unexpected",
        })
    }
}

/// A `[program:<name>]` file for `/etc/supervisor/conf.d`.
///
/// Fields are public so providers can adjust the defaults before rendering.
/// Rendering is a pure function of the fields: the same values always give
/// byte-identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisordConfFile {
    pub program_name: String,
    pub command: String,
    pub directory: String,
    pub process_name: String,
    pub autostart: bool,
    pub autorestart: AutoRestart,
    pub stdout_logfile: String,
    pub stderr_logfile: String,
    /// Rendered as one sorted `environment=K=V,...` line when non-empty.
    pub environment: Option<BTreeMap<String, String>>,
    extra_lines: Vec<String>,
}

impl SupervisordConfFile {
    /// Defaults: one instance of the project executable running `serve` from
    /// the current release directory, logging to the configured log files.
    pub fn new(program_name: impl Into<String>, config: &Config) -> Self {
        Self {
            program_name: program_name.into(),
            command: format!("{} serve", config.executable()),
            directory: config.current_directory(),
            process_name: "%(process_num)s".to_string(),
            autostart: true,
            autorestart: AutoRestart::default(),
            stdout_logfile: config.output_log(),
            stderr_logfile: config.error_log(),
            environment: None,
            extra_lines: Vec::new(),
        }
    }

    /// Append a raw line after the fixed fields.
    pub fn add(&mut self, line: impl Into<String>) {
        self.extra_lines.push(line.into());
    }

    pub fn extra_lines(&self) -> &[String] {
        &self.extra_lines
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("[program:{}]", self.program_name),
            format!("command={}", self.command),
            format!("directory={}", self.directory),
            format!("process_name={}", self.process_name),
            format!("autostart={}", self.autostart),
            format!("autorestart={}", self.autorestart),
            format!("stdout_logfile={}", self.stdout_logfile),
            format!("stderr_logfile={}", self.stderr_logfile),
        ];

        if let Some(vars) = self.environment.as_ref().filter(|vars| !vars.is_empty()) {
            let joined = vars
                .iter()
                .map(|(key, value)| format!("{key}={}", environment_value(value)))
                .collect::<Vec<_>>()
                .join(",");
            lines.insert(3, format!("environment={joined}"));
        }

        lines.extend(self.extra_lines.iter().cloned());
        lines.push(String::new());
        lines.join("\n")
    }
}

/// supervisord splits `environment=` on commas, so such values are quoted.
fn environment_value(value: &str) -> Cow<'_, str> {
    if value.contains(',') {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

impl fmt::Display for SupervisordConfFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
