use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::super::Container;
use super::{format_turn, thinking_spinner};

const RESET_COMMAND: &str = "/reset";
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Interactive terminal chat over a single session.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(&self) -> Result<String> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        let turns = self.run_with(stdin, &mut stdout).await?;
        Ok(format!("Goodbye. ({} messages sent)", turns))
    }

    /// Reads prompts line by line until EOF or a quit command. Returns the
    /// number of prompts sent to the model.
    pub async fn run_with<R, W>(&self, input: R, out: &mut W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let session = self.container.start_session_use_case().execute().await?;
        let id = session.id().to_string();
        writeln!(out, "{}", session.transcript().greeting())?;
        writeln!(out, "(type {} to start over, {} to leave)", RESET_COMMAND, QUIT_COMMANDS[0])?;

        let send = self.container.send_message_use_case();
        let mut lines = input.lines();
        let mut turns = 0;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();

            if line.is_empty() {
                continue;
            }
            if QUIT_COMMANDS.contains(&line) {
                break;
            }
            if line == RESET_COMMAND {
                let session = self.container.reset_session_use_case().execute(&id).await?;
                writeln!(out, "{}", session.transcript().greeting())?;
                continue;
            }

            let spinner = thinking_spinner();
            let result = send.execute(&id, line).await;
            spinner.finish_and_clear();

            let (_, turn) = result?;
            turns += 1;
            writeln!(out, "{}\n", format_turn(&turn))?;
        }

        self.container.end_session_use_case().execute(&id).await?;
        Ok(turns)
    }
}
