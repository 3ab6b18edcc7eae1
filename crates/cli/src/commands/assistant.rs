//! Assistant commands.
//!
//! `ask` sends one question; `chat` opens the widget on stdin. In the chat,
//! `/1`..`/4` pick a quick-start prompt, `/son` toggles read-aloud and
//! `/q` closes the window.

#![allow(clippy::print_stdout)]

use std::io::Write;
use std::sync::Arc;

use bonprix_storefront::assistant::{
    AssistantWidget, ChatEntry, Microphone, SendOutcome, Speaker, UnsupportedRecognizer,
};
use bonprix_storefront::error::Result;
use bonprix_storefront::services::StoreApiClient;
use bonprix_storefront::state::ClientState;
use bonprix_storefront::storage::FileStore;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::terminal::{LoggingSynthesizer, StdoutSink, render_extras};

type TerminalWidget =
    AssistantWidget<StoreApiClient, LoggingSynthesizer, Arc<FileStore>, UnsupportedRecognizer>;

/// A chat command typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    QuickStart(usize),
    ToggleSpeaker,
    Question(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    match line {
        "/q" | "/quit" => Input::Quit,
        "/son" => Input::ToggleSpeaker,
        _ => line
            .strip_prefix('/')
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .map_or(Input::Question(line), |n| Input::QuickStart(n - 1)),
    }
}

fn widget(state: &ClientState) -> TerminalWidget {
    let config = state.config();
    AssistantWidget::new(
        state.api().clone(),
        Speaker::load(
            LoggingSynthesizer::default(),
            state.storage(),
            config.speaker_active,
        ),
        Microphone::new(UnsupportedRecognizer),
        config.typing_delay,
    )
}

/// Print what a send added after the reply itself.
async fn finish_turn(widget: &mut TerminalWidget, before: usize, outcome: &SendOutcome) {
    // The user message and the reply were already shown
    let shown = before + 2;
    if let Some(extras) = widget.transcript().get(shown..) {
        render_extras(extras);
    }

    if let Some(nav) = widget.take_navigation() {
        tokio::time::sleep(nav.after).await;
        println!("→ {}", nav.url);
    }

    tracing::debug!(?outcome, "Assistant turn finished");
}

/// Ask one question.
pub async fn ask(state: &ClientState, question: &str) {
    let mut widget = widget(state);
    let mut sink = StdoutSink::default();

    let before = widget.transcript().len();
    let outcome = widget.send_message(question, &mut sink).await;
    finish_turn(&mut widget, before, &outcome).await;
}

/// Interactive chat on stdin.
///
/// # Errors
///
/// Returns error if stdin cannot be read.
pub async fn chat(state: &ClientState) -> Result<()> {
    let mut widget = widget(state);
    let mut sink = StdoutSink::default();

    widget.toggle();
    render_extras(widget.transcript());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} > ", widget.speaker().icon());
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let before = widget.transcript().len();
        let outcome = match parse_input(&line) {
            Input::Quit => break,
            Input::ToggleSpeaker => {
                let last = widget
                    .transcript()
                    .iter()
                    .rposition(|e| matches!(e, ChatEntry::Message(_)))
                    .unwrap_or_default();
                widget.toggle_speaker(last);
                continue;
            }
            Input::QuickStart(index) => widget.choose_quick_start(index, &mut sink).await,
            Input::Question(question) => widget.send_message(question, &mut sink).await,
        };

        if outcome != SendOutcome::Ignored {
            finish_turn(&mut widget, before, &outcome).await;
        }
    }

    widget.toggle();
    Ok(())
}
