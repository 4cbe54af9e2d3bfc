//! Terminal question loop
//!
//! Generic over its input and output streams so the same loop runs against
//! stdin/stdout in the binary and in-memory buffers in tests.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::pipeline::RagPipeline;
use crate::providers::GenerationParams;
use crate::session::ChatSession;

/// Shown before every question
pub const PROMPT: &str = "\nAsk a question (or type 'exit' to quit): ";

/// Printed whenever the loop ends
pub const FAREWELL: &str = "👋 Goodbye!";

/// Header printed above each answer
pub const RESPONSE_HEADER: &str = "🧠 Response:";

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// User typed `exit` or `quit`
    Command,
    /// Input stream closed
    EndOfInput,
    /// Shutdown signal (Ctrl-C)
    Interrupted,
}

/// `exit` / `quit`, ignoring case and surrounding whitespace
pub fn is_exit_command(line: &str) -> bool {
    let cmd = line.trim();
    cmd.eq_ignore_ascii_case("exit") || cmd.eq_ignore_ascii_case("quit")
}

/// Read-eval-print loop over one pipeline
pub struct Repl<'a> {
    pipeline: &'a RagPipeline,
    params: GenerationParams,
}

impl<'a> Repl<'a> {
    pub fn new(pipeline: &'a RagPipeline, params: GenerationParams) -> Self {
        Self { pipeline, params }
    }

    /// Answer a single question and print it
    pub async fn ask_once<W>(
        &self,
        session: &mut ChatSession,
        question: &str,
        out: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let answer = session
            .ask(self.pipeline, question, &self.params)
            .await?
            .content
            .clone();
        write_answer(out, &answer).await
    }

    /// Run until an exit command, end of input, or `shutdown` resolves.
    ///
    /// A failed turn is reported on `err` and the loop keeps going.
    pub async fn run<R, W, E, S>(
        &self,
        session: &mut ChatSession,
        input: R,
        out: &mut W,
        err: &mut E,
        shutdown: S,
    ) -> Result<ReplExit>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut lines = input.lines();

        loop {
            out.write_all(PROMPT.as_bytes()).await?;
            out.flush().await?;

            let line = tokio::select! {
                _ = &mut shutdown => return farewell(out, ReplExit::Interrupted).await,
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                return farewell(out, ReplExit::EndOfInput).await;
            };

            if is_exit_command(&line) {
                out.write_all(format!("{}\n", FAREWELL).as_bytes()).await?;
                out.flush().await?;
                return Ok(ReplExit::Command);
            }

            // Anything that is not an exit command goes to the pipeline verbatim
            let turn = tokio::select! {
                _ = &mut shutdown => return farewell(out, ReplExit::Interrupted).await,
                turn = session.ask(self.pipeline, &line, &self.params) => {
                    turn.map(|m| m.content.clone())
                }
            };

            match turn {
                Ok(answer) => write_answer(out, &answer).await?,
                Err(e) => {
                    err.write_all(format!("\nError: {}\n", e).as_bytes()).await?;
                    err.flush().await?;
                }
            }
        }
    }
}

async fn write_answer<W: AsyncWrite + Unpin>(out: &mut W, answer: &str) -> Result<()> {
    out.write_all(format!("\n{}\n{}\n", RESPONSE_HEADER, answer).as_bytes())
        .await?;
    out.flush().await?;
    Ok(())
}

async fn farewell<W: AsyncWrite + Unpin>(out: &mut W, exit: ReplExit) -> Result<ReplExit> {
    out.write_all(format!("\n{}\n", FAREWELL).as_bytes()).await?;
    out.flush().await?;
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RagConfig;
    use crate::test_support::{faq_file, HashingEmbedder, RecordingChatModel};
    use crate::types::Role;
    use std::future::pending;
    use std::sync::Arc;

    fn pipeline(path: &std::path::Path, model: Arc<RecordingChatModel>) -> RagPipeline {
        let mut config = RagConfig::default();
        config.source_path = path.to_path_buf();
        RagPipeline::new(&config, Arc::new(HashingEmbedder::new()), model).unwrap()
    }

    fn params() -> GenerationParams {
        GenerationParams::from_config(&RagConfig::default().llm)
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT \n"));
        assert!(is_exit_command("Exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("what are your office hours?"));
    }

    #[tokio::test]
    async fn test_loop_answers_until_exit() {
        let (_dir, path) = faq_file("Q: What are your office hours? A: 9am-5pm Mon-Fri.");
        let model = Arc::new(RecordingChatModel::answering("9am to 5pm."));
        let pipeline = pipeline(&path, model.clone());
        let repl = Repl::new(&pipeline, params());

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"What are your office hours?\nQuit\nnever asked\n";

        let exit = repl
            .run(&mut session, input, &mut out, &mut err, pending())
            .await
            .unwrap();

        assert_eq!(exit, ReplExit::Command);
        assert_eq!(model.calls().len(), 1);
        assert_eq!(session.messages().len(), 3);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("🧠 Response:\n9am to 5pm."));
        assert!(out.trim_end().ends_with(FAREWELL));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_questions_reach_pipeline_verbatim() {
        let (_dir, path) = faq_file("Q: Pets? A: Yes.");
        let model = Arc::new(RecordingChatModel::answering("Yes."));
        let pipeline = pipeline(&path, model.clone());
        let repl = Repl::new(&pipeline, params());

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"\n  Pets allowed?  \nexit\n";

        let exit = repl
            .run(&mut session, input, &mut out, &mut err, pending())
            .await
            .unwrap();

        assert_eq!(exit, ReplExit::Command);
        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0[1].content, "");
        assert_eq!(calls[1].0[1].content, "  Pets allowed?  ");

        let users: Vec<&str> = session
            .messages()
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(users, vec!["", "  Pets allowed?  "]);
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let (_dir, path) = faq_file("Q: Pets? A: Yes.");
        let model = Arc::new(RecordingChatModel::answering("Yes."));
        let pipeline = pipeline(&path, model);
        let repl = Repl::new(&pipeline, params());

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"Pets?";

        let exit = repl
            .run(&mut session, input, &mut out, &mut err, pending())
            .await
            .unwrap();

        assert_eq!(exit, ReplExit::EndOfInput);
        assert_eq!(session.messages().len(), 3);
        assert!(String::from_utf8(out).unwrap().ends_with("\n👋 Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_failed_turn_reports_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(RecordingChatModel::answering("unused"));
        let pipeline = pipeline(&dir.path().join("missing.txt"), model);
        let repl = Repl::new(&pipeline, params());

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let input: &[u8] = b"Hours?\nHours again?\nexit\n";

        let exit = repl
            .run(&mut session, input, &mut out, &mut err, pending())
            .await
            .unwrap();

        assert_eq!(exit, ReplExit::Command);
        let err = String::from_utf8(err).unwrap();
        assert_eq!(err.matches("Cannot read source document").count(), 2);
        let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::User]);
    }

    #[tokio::test]
    async fn test_interrupt_ends_loop_gracefully() {
        let (_dir, path) = faq_file("Q: Pets? A: Yes.");
        let model = Arc::new(RecordingChatModel::answering("Yes."));
        let pipeline = pipeline(&path, model.clone());
        let repl = Repl::new(&pipeline, params());

        // Reader that never yields a line
        let (reader, _writer) = tokio::io::duplex(64);
        let input = tokio::io::BufReader::new(reader);

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let exit = repl
            .run(&mut session, input, &mut out, &mut err, async {})
            .await
            .unwrap();

        assert_eq!(exit, ReplExit::Interrupted);
        assert!(model.calls().is_empty());
        assert!(String::from_utf8(out).unwrap().ends_with("\n👋 Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_ask_once() {
        let (_dir, path) = faq_file("Q: Pets? A: Yes.");
        let model = Arc::new(RecordingChatModel::answering("Yes, pets are welcome."));
        let pipeline = pipeline(&path, model);
        let repl = Repl::new(&pipeline, params());

        let mut session = ChatSession::new();
        let mut out = Vec::new();
        repl.ask_once(&mut session, "Pets?", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\n🧠 Response:\nYes, pets are welcome.\n"
        );
    }
}
