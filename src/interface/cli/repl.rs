//! `abelterm` 대화형 터미널(REPL) 인터페이스.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use tracing::debug;

use crate::application::config::ConfigOverrides;
use crate::application::usecases::session::TerminalSession;
use crate::infrastructure::adapters::ScreenMode;
use crate::interface::cli::composition::AppComposition;
use crate::interface::cli::repl_input::{
    EditorAction, InputEvent, LineEditor, RawModeGuard, clear_prompt, spawn_key_reader,
    supports_interactive_input, supports_styled_output,
};

/// 터미널 세션을 띄우고 `exit`/`quit` 또는 입력 종료까지 명령을 처리한다.
pub async fn run_repl(composition: &AppComposition, overrides: &ConfigOverrides) -> Result<()> {
    let mode = if supports_styled_output() {
        ScreenMode::Styled
    } else {
        ScreenMode::Plain
    };
    let session = composition.terminal_session(overrides, mode)?;

    if supports_interactive_input() {
        run_interactive(session).await
    } else {
        run_sequential(session).await
    }
}

async fn run_interactive(mut session: TerminalSession) -> Result<()> {
    let mut stdout = io::stdout();
    let _guard = RawModeGuard::enter(&mut stdout)?;
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    session.show_banner();
    let mut events = spawn_key_reader(session.gate());
    let mut editor = LineEditor::default();
    editor.render(&mut stdout, session.theme())?;

    while let Some(event) = events.recv().await {
        let action = match event {
            InputEvent::Key(key) => editor.handle_key(key),
            InputEvent::Paste(text) => {
                editor.paste(&text);
                EditorAction::Pending
            }
        };

        match action {
            EditorAction::Pending => {}
            EditorAction::Exit => break,
            EditorAction::Submit(input) => {
                clear_prompt(&mut stdout)?;
                if is_exit_command(&input) {
                    break;
                }
                let outcome = session.submit(&input).await;
                debug!(?outcome, "submission finished");
            }
        }

        editor.render(&mut stdout, session.theme())?;
    }

    clear_prompt(&mut stdout)?;
    Ok(())
}

/// 파이프 입력: 한 줄씩, 앞 줄 출력이 끝난 뒤 다음 줄을 처리한다.
async fn run_sequential(mut session: TerminalSession) -> Result<()> {
    session.show_banner();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if is_exit_command(&line) {
            break;
        }
        session.submit(&line).await;
    }

    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}
