use clap::Parser;

#[derive(Parser)]
#[command(name = "evolve")]
#[command(about = "Sidecar hook adapter - notes CRUD and prompt assembly", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Hook name to dispatch (e.g. discover, mutate_request, execute_tool)
    pub hook: String,
}
