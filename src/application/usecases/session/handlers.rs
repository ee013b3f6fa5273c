//! 명령별 처리기. 원격 실패는 명령별 고정 문구의 오류 라인 하나로 바뀐다.

use chrono::Local;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::TerminalSession;
use crate::application::ports::ApiError;
use crate::domain::command::Command;
use crate::domain::line::{Line, LineKind};
use crate::domain::texts::{CAT, VOIDZ_PHRASES, about_text, help_lines};
use crate::domain::theme::ThemeRegistry;
use crate::domain::volume::{
    Volume, VolumeSummary, render_volume, render_volume_body, render_volume_stats,
};

impl TerminalSession {
    pub(super) async fn execute(&mut self, command: Command) {
        match command {
            Command::Help => self.type_lines(help_lines()).await,
            Command::About => self.about().await,
            Command::Date => {
                let now = Local::now().format("%a %b %d %Y %H:%M:%S GMT%z");
                self.type_lines(vec![Line::info(now.to_string())]).await;
            }
            Command::Blessing => self.blessing().await,
            Command::Latest => {
                let result = self.api.latest_volume().await;
                self.show_volume(result, "Error: Could not fetch latest volume.".to_string())
                    .await;
            }
            Command::Random => {
                let result = self.api.random_volume().await;
                self.show_volume(result, "Error: Could not fetch random volume.".to_string())
                    .await;
            }
            Command::View { volume } => {
                let result = self.api.volume(volume).await;
                self.show_volume(
                    result,
                    format!("Error: Volume {volume} not found or is not published."),
                )
                .await;
            }
            Command::Search { keyword } => self.search(&keyword).await,
            Command::Catalogue => self.catalogue().await,
            Command::Favorite { volume } => self.favorite(volume).await,
            Command::Favorites => self.list_favorites().await,
            Command::Rate { volume, rating } => self.rate(volume, rating).await,
            Command::Theme { name } => self.switch_theme(&name).await,
            Command::Themes => {
                let mut lines = vec![Line::system("--- Available Themes ---")];
                lines.extend(ThemeRegistry::names().into_iter().map(Line::info));
                self.type_lines(lines).await;
            }
            Command::Clear => {
                self.transcript.clear();
                self.screen.clear();
            }
            Command::Api => {
                let lines = vec![
                    Line::system(format!("Current API base: {}", self.api.base_url())),
                    Line::info("Set ABELTERM_API_BASE or --api-base (ending with /api) to override."),
                ];
                self.type_lines(lines).await;
            }
            Command::Cat => {
                let lines = CAT.trim_start_matches('\n').lines().map(Line::info).collect();
                self.type_lines(lines).await;
            }
            Command::Stats { volume } => self.stats(volume).await,
            Command::Export { start, end } => self.export(start, end).await,
            Command::Voidz { volume: None } => self.voidz_phrases().await,
            Command::Voidz {
                volume: Some(volume),
            } => self.voidz_volume(volume).await,
        }
    }

    async fn about(&mut self) {
        let text = about_text(
            env!("CARGO_PKG_VERSION"),
            self.theme.name,
            self.uptime_minutes(),
            self.favorites.len(),
        );
        let lines = text.lines().map(Line::info).collect();
        self.type_lines(lines).await;
    }

    async fn blessing(&mut self) {
        let line = match self.api.random_blessing().await {
            Ok(blessing) => Line::system(format!(
                "[Random Blessing] - {} ({})",
                blessing.item, blessing.description
            )),
            Err(err) => {
                debug!(error = %err, "motd failed");
                Line::error("Error: Could not retrieve Message of the Day.")
            }
        };
        self.type_lines(vec![line]).await;
    }

    async fn show_volume(
        &mut self,
        result: Result<Volume, ApiError>,
        failure: String,
    ) {
        match result {
            Ok(volume) => self.type_lines(render_volume(&volume)).await,
            Err(err) => {
                debug!(error = %err, "volume fetch failed");
                self.type_lines(vec![Line::error(failure)]).await;
            }
        }
    }

    async fn search(&mut self, keyword: &str) {
        let lines = match self.api.search(keyword).await {
            Ok(found) => {
                let mut lines = vec![Line::system(format!(
                    "--- Search results for \"{keyword}\" ---"
                ))];
                if found.is_empty() {
                    lines.push(Line::info("No matching volumes found."));
                } else {
                    lines.extend(summary_lines(&found));
                }
                lines
            }
            Err(err) => {
                debug!(error = %err, "search failed");
                vec![Line::error("Error during search.")]
            }
        };
        self.type_lines(lines).await;
    }

    async fn catalogue(&mut self) {
        let lines = match self.api.catalogue().await {
            Ok(volumes) => {
                let mut lines = vec![Line::system("--- Published Volumes ---")];
                lines.extend(summary_lines(&volumes));
                lines
            }
            Err(err) if err.is_not_found() => vec![Line::error(format!(
                "404 Not Found at {}/volumes/catalogue. Point ABELTERM_API_BASE or --api-base at your API (ending in /api).",
                self.api.base_url()
            ))],
            Err(err) => {
                debug!(error = %err, "catalogue failed");
                vec![Line::error("Error: Could not fetch volume catalogue.")]
            }
        };
        self.type_lines(lines).await;
    }

    async fn favorite(&mut self, volume: u32) {
        let line = if self.favorites.insert(volume) {
            self.persist_favorites();
            Line::system(format!("Volume {volume} added to your favorites."))
        } else {
            Line::info(format!("Volume {volume} is already in your favorites."))
        };
        self.type_lines(vec![line]).await;
    }

    async fn list_favorites(&mut self) {
        let mut lines = vec![Line::system("--- Your Favorite Volumes ---")];
        if self.favorites.is_empty() {
            lines.push(Line::info("You have no favorited volumes."));
        } else {
            lines.extend(
                self.favorites
                    .iter()
                    .map(|number| Line::info(format!("Volume {number}"))),
            );
        }
        self.type_lines(lines).await;
    }

    async fn rate(&mut self, volume: u32, rating: u8) {
        let line = match self.api.rate(volume, rating).await {
            Ok(message) if message.trim().is_empty() => {
                Line::system(format!("Rating of {rating} recorded for Volume {volume}."))
            }
            Ok(message) => Line::system(message),
            Err(err) => {
                debug!(error = %err, "rating failed");
                Line::error(
                    err.server_message()
                        .unwrap_or("Error submitting rating.")
                        .to_string(),
                )
            }
        };
        self.type_lines(vec![line]).await;
    }

    async fn switch_theme(&mut self, name: &str) {
        let line = match ThemeRegistry::find(name) {
            Some(theme) => {
                self.theme = theme;
                Line::system(format!("Theme set to '{}'.", theme.name))
            }
            None => Line::error(format!(
                "Error: Theme not found. Available: {}",
                ThemeRegistry::names().join(", ")
            )),
        };
        self.type_lines(vec![line]).await;
    }

    async fn stats(&mut self, volume: u32) {
        let lines = match self.api.volume(volume).await {
            Ok(found) => render_volume_stats(&found),
            Err(err) => {
                debug!(error = %err, "stats failed");
                vec![Line::error(format!(
                    "Error: Could not retrieve stats for Volume {volume}."
                ))]
            }
        };
        self.type_lines(lines).await;
    }

    async fn export(&mut self, start: u32, end: u32) {
        self.push_line(Line::system(format!(
            "Exporting volumes {start} to {end}..."
        )));

        let line = match self.api.export(start, end).await {
            Ok(content) => {
                let file_name = format!("Abel_Experience_Export_{start}-{end}.txt");
                match self.exporter.write(&file_name, &content) {
                    Ok(path) => Line::system(format!(
                        "Export complete. Saved to {}.",
                        path.display()
                    )),
                    Err(err) => {
                        warn!(error = %err, "failed to write export file");
                        Line::error("Error: Could not write the export file.")
                    }
                }
            }
            Err(err) => {
                debug!(error = %err, "export failed");
                Line::error(
                    err.server_message()
                        .unwrap_or("Error during export.")
                        .to_string(),
                )
            }
        };
        self.type_lines(vec![line]).await;
    }

    async fn voidz_phrases(&mut self) {
        for phrase in VOIDZ_PHRASES {
            self.scramble_line(LineKind::System, phrase).await;
            sleep(self.typewriter.scramble_pause).await;
        }
    }

    async fn voidz_volume(&mut self, number: u32) {
        let volume = match self.api.volume(number).await {
            Ok(volume) => volume,
            Err(err) => {
                debug!(error = %err, "voidz fetch failed");
                self.type_lines(vec![Line::error(format!(
                    "Error: Volume {number} not found in the VOIDZ or is not published."
                ))])
                .await;
                return;
            }
        };

        self.type_lines(vec![Line::system(format!(
            "--- VOIDZ ACCESS: Volume {}: {} ---",
            volume.volume_number, volume.title
        ))])
        .await;

        for line in render_volume_body(&volume) {
            if line.text.is_empty() {
                self.push_line(line);
                continue;
            }
            self.scramble_line(line.kind, &line.text).await;
            sleep(self.typewriter.scramble_pause).await;
        }
    }
}

fn summary_lines(volumes: &[VolumeSummary]) -> Vec<Line> {
    volumes
        .iter()
        .map(|volume| Line::info(volume.list_entry()))
        .collect()
}
