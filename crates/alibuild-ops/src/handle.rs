use crate::{CommandRunner, ShellCommandRunner, ShellError, ShellOption, ShellResult};

/// Substring that marks support for `aliBuild build --fetch-repos`.
pub const FETCH_REPOS_OPTION: &str = "fetch-repos";

/// Handle on one aliBuild executable acting on one package.
///
/// Every method formats a single command line and submits it to the runner.
/// Nothing is retried, and results come back exactly as the runner produced
/// them.
#[derive(Debug, Clone)]
pub struct AliBuild<R = ShellCommandRunner> {
    executable: String,
    env: Vec<String>,
    package_name: String,
    runner: R,
}

impl AliBuild<ShellCommandRunner> {
    /// Handle that runs commands through `sh -c`.
    pub fn new(
        executable: impl Into<String>,
        package_name: impl Into<String>,
        env: Vec<String>,
    ) -> Self {
        Self::with_runner(executable, package_name, env, ShellCommandRunner::new())
    }
}

impl<R: CommandRunner> AliBuild<R> {
    pub fn with_runner(
        executable: impl Into<String>,
        package_name: impl Into<String>,
        env: Vec<String>,
        runner: R,
    ) -> Self {
        Self {
            executable: executable.into(),
            env,
            package_name: package_name.into(),
            runner,
        }
    }

    /// Path of the aliBuild executable in use.
    pub fn which(&self) -> &str {
        &self.executable
    }

    /// Package the subcommands act upon.
    pub fn package(&self) -> &str {
        &self.package_name
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) {
        self.package_name = package_name.into();
    }

    /// Environment attached to `build` and `doctor`.
    ///
    /// Per-call `ShellOption::Env` options are placed ahead of it, so they
    /// shadow a default with the same key and add anything new.
    pub fn default_env(&self) -> &[String] {
        &self.env
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// `aliBuild build <args> <package>`
    pub fn build(&self, args: &str, options: &[ShellOption]) -> ShellResult {
        let cmd = format!("{} build {} {}", self.executable, args, self.package_name);
        self.run_with_default_env(&cmd, options)
    }

    /// `aliBuild doctor <args> <package>`
    pub fn doctor(&self, args: &str, options: &[ShellOption]) -> ShellResult {
        let cmd = format!("{} doctor {} {}", self.executable, args, self.package_name);
        self.run_with_default_env(&cmd, options)
    }

    /// `aliBuild clean [--debug]`. The default environment is not attached.
    pub fn clean(&self, debug: bool) -> ShellResult {
        let debug_option = if debug { "--debug" } else { "" };
        let cmd = format!("{} clean {}", self.executable, debug_option);
        self.submit(&cmd, &[])
    }

    /// First line of `aliBuild version`, trimmed.
    pub fn version(&self) -> Result<String, ShellError> {
        let cmd = format!("{} version", self.executable);
        let result = self.submit(&cmd, &[]);

        match result.error {
            Some(err) => Err(err),
            None => Ok(result.stdout.text(true).trim().to_string()),
        }
    }

    /// `aliBuild <name> --help`
    pub fn command_help(&self, name: &str) -> ShellResult {
        let cmd = format!("{} {} --help", self.executable, name);
        self.submit(&cmd, &[])
    }

    /// `aliBuild --help`
    pub fn help(&self) -> ShellResult {
        let cmd = format!("{} --help", self.executable);
        self.submit(&cmd, &[])
    }

    /// Whether `aliBuild build --help` mentions `fetch-repos` anywhere.
    ///
    /// A failing help command is logged, not propagated; the check then runs
    /// on whatever stdout was captured.
    pub fn has_fetch_repos_option(&self) -> bool {
        let result = self.command_help("build");
        if let Some(err) = &result.error {
            tracing::warn!(
                command = %result.command,
                code = err.code(),
                error = %err,
                option = FETCH_REPOS_OPTION,
                "build help failed while probing for option"
            );
        }

        result.stdout.text(false).contains(FETCH_REPOS_OPTION)
    }

    fn run_with_default_env(&self, cmd: &str, options: &[ShellOption]) -> ShellResult {
        let mut options = options.to_vec();
        options.push(ShellOption::Env(self.env.clone()));
        self.submit(cmd, &options)
    }

    fn submit(&self, cmd: &str, options: &[ShellOption]) -> ShellResult {
        tracing::debug!(command = cmd, package = %self.package_name, "running aliBuild");
        self.runner.run(cmd, options)
    }
}
