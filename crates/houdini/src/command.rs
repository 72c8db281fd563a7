use crate::Cli;
use crate::CommandResult;

/// A `houdini` subcommand. Commands hand their work off to blocking worker
/// threads, so they must be movable across threads.
pub(crate) trait RunnableCommand: std::fmt::Debug + Send + 'static {
    async fn run(self, cli: Cli) -> CommandResult;
}
