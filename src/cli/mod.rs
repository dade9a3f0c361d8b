use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat UI in the browser
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Ask a single question and print the reply
    Ask { prompt: String },

    /// Chat in the terminal (/reset starts over, /quit leaves)
    Chat,
}
