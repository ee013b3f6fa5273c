use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::*;
use crate::application::ports::ApiError;
use crate::domain::line::LineKind;
use crate::domain::theme::ThemeRegistry;
use crate::domain::volume::{Blessing, Volume, VolumeSummary};

#[derive(Default)]
struct FakeApi {
    volumes: HashMap<u32, Volume>,
    offline: bool,
    catalogue_missing: bool,
    rate_error: Option<ApiError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn summaries(&self) -> Vec<VolumeSummary> {
        let mut found: Vec<VolumeSummary> = self.volumes.values().map(VolumeSummary::from).collect();
        found.sort_by_key(|v| v.volume_number);
        found
    }
}

#[async_trait]
impl VolumeApi for FakeApi {
    fn base_url(&self) -> &str {
        "http://fake.test/api/public"
    }

    async fn random_blessing(&self) -> Result<Blessing, ApiError> {
        self.record("motd".to_string())?;
        Ok(Blessing {
            item: "Golden Shovel".to_string(),
            description: "dig deeper".to_string(),
        })
    }

    async fn latest_volume(&self) -> Result<Volume, ApiError> {
        self.record("latest".to_string())?;
        let max = self.volumes.keys().max().copied();
        max.and_then(|n| self.volumes.get(&n).cloned())
            .ok_or(ApiError::NotFound { message: None })
    }

    async fn random_volume(&self) -> Result<Volume, ApiError> {
        self.record("random".to_string())?;
        self.volumes
            .values()
            .next()
            .cloned()
            .ok_or(ApiError::NotFound { message: None })
    }

    async fn volume(&self, number: u32) -> Result<Volume, ApiError> {
        self.record(format!("volume:{number}"))?;
        self.volumes.get(&number).cloned().ok_or(ApiError::NotFound {
            message: Some("Volume not found or is not published.".to_string()),
        })
    }

    async fn search(&self, keyword: &str) -> Result<Vec<VolumeSummary>, ApiError> {
        self.record(format!("search:{keyword}"))?;
        let keyword = keyword.to_lowercase();
        Ok(self
            .summaries()
            .into_iter()
            .filter(|v| v.title.to_lowercase().contains(&keyword))
            .collect())
    }

    async fn catalogue(&self) -> Result<Vec<VolumeSummary>, ApiError> {
        self.record("catalogue".to_string())?;
        if self.catalogue_missing {
            return Err(ApiError::NotFound { message: None });
        }
        Ok(self.summaries())
    }

    async fn rate(&self, number: u32, rating: u8) -> Result<String, ApiError> {
        self.record(format!("rate:{number}:{rating}"))?;
        match &self.rate_error {
            Some(err) => Err(err.clone()),
            None => Ok(format!("Thank you for rating Volume {number}!")),
        }
    }

    async fn export(&self, start: u32, end: u32) -> Result<String, ApiError> {
        self.record(format!("export:{start}:{end}"))?;
        Ok(format!("volumes {start}..={end}"))
    }
}

#[derive(Clone, Default)]
struct MemoryStore {
    saved: Arc<Mutex<Vec<BTreeSet<u32>>>>,
    initial: BTreeSet<u32>,
    broken: bool,
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<BTreeSet<u32>> {
        if self.broken {
            bail!("storage unavailable");
        }
        Ok(self.initial.clone())
    }

    fn save(&self, favorites: &BTreeSet<u32>) -> Result<()> {
        if self.broken {
            bail!("disk full");
        }
        self.saved.lock().unwrap().push(favorites.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemoryExporter {
    files: Arc<Mutex<Vec<(String, String)>>>,
}

impl ExportWriter for MemoryExporter {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_string()));
        Ok(PathBuf::from("/exports").join(file_name))
    }
}

#[derive(Debug, Clone)]
enum Frame {
    Append(Line),
    Update(Line),
    Clear,
}

#[derive(Clone, Default)]
struct RecordingScreen {
    frames: Arc<Mutex<Vec<Frame>>>,
    busy_seen: Arc<Mutex<Vec<bool>>>,
    gate: Arc<Mutex<Option<InputGate>>>,
}

impl RecordingScreen {
    fn observe_gate(&self) {
        if let Some(gate) = self.gate.lock().unwrap().as_ref() {
            self.busy_seen.lock().unwrap().push(gate.is_busy());
        }
    }
}

impl Screen for RecordingScreen {
    fn append(&mut self, line: &Line, _theme: &Theme) {
        self.observe_gate();
        self.frames.lock().unwrap().push(Frame::Append(line.clone()));
    }

    fn update(&mut self, line: &Line, _theme: &Theme) {
        self.observe_gate();
        self.frames.lock().unwrap().push(Frame::Update(line.clone()));
    }

    fn clear(&mut self) {
        self.frames.lock().unwrap().push(Frame::Clear);
    }
}

struct Harness {
    session: TerminalSession,
    calls: Arc<Mutex<Vec<String>>>,
    store: MemoryStore,
    screen: RecordingScreen,
    exporter: MemoryExporter,
}

impl Harness {
    fn new(api: FakeApi, store: MemoryStore, typewriter: TypewriterSettings) -> Self {
        let calls = Arc::clone(&api.calls);
        let screen = RecordingScreen::default();
        let exporter = MemoryExporter::default();
        let session = TerminalSession::new(
            SessionPorts {
                api: Box::new(api),
                store: Box::new(store.clone()),
                exporter: Box::new(exporter.clone()),
                screen: Box::new(screen.clone()),
            },
            ThemeRegistry::default_theme(),
            typewriter,
        )
        .with_seed(7);
        *screen.gate.lock().unwrap() = Some(session.gate());

        Self {
            session,
            calls,
            store,
            screen,
            exporter,
        }
    }

    fn instant(api: FakeApi) -> Self {
        Self::new(api, MemoryStore::default(), TypewriterSettings::instant())
    }

    fn texts(&self) -> Vec<String> {
        self.session
            .transcript()
            .lines()
            .iter()
            .map(|l| l.text.clone())
            .collect()
    }

    /// `from` 이후에 추가된 라인.
    fn lines_since(&self, from: usize) -> Vec<Line> {
        self.session.transcript().lines()[from..].to_vec()
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn volume(number: u32, title: &str) -> Volume {
    Volume {
        volume_number: number,
        title: title.to_string(),
        body_lines: vec!["a".to_string(), "".to_string(), "b".to_string()],
        blessing_intro: Some("You have been blessed with:".to_string()),
        blessings: vec![Blessing {
            item: "X".to_string(),
            description: "Y".to_string(),
        }],
        dream: Some("dream: a quiet harbor".to_string()),
        ..Volume::default()
    }
}

fn library() -> FakeApi {
    let mut api = FakeApi::default();
    api.volumes.insert(3, volume(3, "Night Shift"));
    api.volumes.insert(8, volume(8, "Blue Monday"));
    api
}

#[tokio::test(start_paused = true)]
async fn command_names_are_case_insensitive() {
    let mut h = Harness::instant(library());

    for input in ["VIEW 3", "View 3", "view 3"] {
        let before = h.session.transcript().len();
        assert_eq!(h.session.submit(input).await, Submission::Completed);
        let added = h.lines_since(before);
        assert_eq!(added[0].text, format!("> {input}"));
        assert_eq!(
            added[1].text,
            "--- Initializing The Abel Experience™ Volume 3: Night Shift ---"
        );
    }

    assert_eq!(h.calls(), vec!["volume:3", "volume:3", "volume:3"]);
}

#[tokio::test(start_paused = true)]
async fn echo_is_appended_whole_before_typed_output() {
    let mut h = Harness::instant(library());
    h.session.submit("view 3").await;

    let appended: Vec<Line> = h
        .screen
        .frames
        .lock()
        .unwrap()
        .iter()
        .filter_map(|frame| match frame {
            Frame::Append(line) => Some(line.clone()),
            _ => None,
        })
        .collect();

    assert_eq!(appended[0], Line::user("> view 3"));
    assert!(!appended[0].is_typing);
    assert!(appended[1].is_typing);
    assert!(appended[1].text.is_empty());
    assert_eq!(appended[1].kind, LineKind::System);
}

#[tokio::test(start_paused = true)]
async fn volume_render_order_is_fixed() {
    let mut h = Harness::instant(library());
    h.session.submit("latest").await;

    let texts: Vec<String> = h.lines_since(1).into_iter().map(|l| l.text).collect();
    assert_eq!(
        texts,
        vec![
            "--- Initializing The Abel Experience™ Volume 8: Blue Monday ---",
            "> a",
            "",
            "> b",
            "You have been blessed with:",
            "- X (Y)",
            "dream: a quiet harbor",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn favorite_twice_keeps_single_entry() {
    let mut h = Harness::instant(FakeApi::default());

    h.session.submit("favorite 5").await;
    let before = h.session.transcript().len();
    h.session.submit("favorite 5").await;

    assert_eq!(h.session.favorites().iter().collect::<Vec<_>>(), vec![5]);
    let added = h.lines_since(before);
    assert_eq!(added[1].text, "Volume 5 is already in your favorites.");

    let saved = h.store.saved.lock().unwrap().clone();
    assert_eq!(saved, vec![BTreeSet::from([5])]);
    assert!(h.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn favorites_are_loaded_from_store() {
    let store = MemoryStore {
        initial: BTreeSet::from([4, 2]),
        ..MemoryStore::default()
    };
    let mut h = Harness::new(FakeApi::default(), store, TypewriterSettings::instant());

    h.session.submit("favorites").await;
    let texts = h.texts();
    assert_eq!(
        &texts[texts.len() - 3..],
        &["--- Your Favorite Volumes ---", "Volume 2", "Volume 4"]
    );
}

#[tokio::test(start_paused = true)]
async fn storage_failures_are_swallowed() {
    let store = MemoryStore {
        broken: true,
        ..MemoryStore::default()
    };
    let mut h = Harness::new(FakeApi::default(), store, TypewriterSettings::instant());

    assert!(h.session.favorites().is_empty());
    h.session.submit("favorite 11").await;

    assert!(h.session.favorites().contains(11));
    assert_eq!(
        h.session.transcript().last().map(|l| l.text.as_str()),
        Some("Volume 11 added to your favorites.")
    );
}

#[tokio::test(start_paused = true)]
async fn rate_is_validated_before_any_remote_call() {
    let mut h = Harness::instant(library());

    for bad in ["rate", "rate 3", "rate 3 0", "rate 3 101", "rate 3 abc", "rate x 50"] {
        let before = h.session.transcript().len();
        h.session.submit(bad).await;
        let added = h.lines_since(before);
        assert_eq!(added.len(), 2, "{bad}");
        assert_eq!(added[1].kind, LineKind::Error);
        assert_eq!(added[1].text, "Usage: rate [volume number] [rating 1-100]");
    }
    assert!(h.calls().is_empty());

    h.session.submit("rate 3 88").await;
    assert_eq!(h.calls(), vec!["rate:3:88"]);
    let last = h.session.transcript().last().unwrap();
    assert_eq!(last.kind, LineKind::System);
    assert_eq!(last.text, "Thank you for rating Volume 3!");
}

#[tokio::test(start_paused = true)]
async fn rate_failure_surfaces_server_message() {
    let mut api = library();
    api.rate_error = Some(ApiError::Status {
        status: 429,
        message: Some("You already rated this volume.".to_string()),
    });
    let mut h = Harness::instant(api);

    h.session.submit("rate 3 10").await;
    let last = h.session.transcript().last().unwrap();
    assert_eq!(last.kind, LineKind::Error);
    assert_eq!(last.text, "You already rated this volume.");
}

#[tokio::test(start_paused = true)]
async fn view_errors_produce_exactly_one_error_line() {
    let mut h = Harness::instant(library());

    for (input, message) in [
        (
            "view abc",
            "Error: Please provide a valid volume number. Usage: view [number]",
        ),
        ("view 99", "Error: Volume 99 not found or is not published."),
    ] {
        let before = h.session.transcript().len();
        h.session.submit(input).await;
        let added = h.lines_since(before);
        assert_eq!(added.len(), 2, "{input}");
        assert_eq!(added[0].kind, LineKind::User);
        assert_eq!(added[1].kind, LineKind::Error);
        assert_eq!(added[1].text, message);
    }
    assert_eq!(h.calls(), vec!["volume:99"]);
}

#[tokio::test(start_paused = true)]
async fn clear_keeps_favorites_and_theme() {
    let mut h = Harness::instant(FakeApi::default());
    h.session.show_banner();
    h.session.submit("favorite 2").await;
    h.session.submit("theme rose").await;

    h.session.submit("clear").await;

    assert!(h.session.transcript().is_empty());
    assert!(h.session.favorites().contains(2));
    assert_eq!(h.session.theme().name, "rose");
    let frames = h.screen.frames.lock().unwrap();
    assert!(matches!(frames.last(), Some(Frame::Clear)));
}

#[tokio::test(start_paused = true)]
async fn theme_switch_matches_any_case() {
    let mut h = Harness::instant(FakeApi::default());

    h.session.submit("theme neon").await;
    assert_eq!(h.session.theme().name, "default");
    let last = h.session.transcript().last().unwrap();
    assert_eq!(last.kind, LineKind::Error);
    assert!(last.text.starts_with("Error: Theme not found. Available: default, amber, matrix"));

    h.session.submit("theme MATRIX").await;
    assert_eq!(h.session.theme().name, "matrix");
    assert_eq!(
        h.session.transcript().last().map(|l| l.text.as_str()),
        Some("Theme set to 'matrix'.")
    );
}

#[tokio::test(start_paused = true)]
async fn input_is_refused_while_revealing() {
    let mut h = Harness::new(
        library(),
        MemoryStore::default(),
        TypewriterSettings::default(),
    );

    h.session.submit("view 3").await;

    let busy_seen = h.screen.busy_seen.lock().unwrap().clone();
    assert!(!busy_seen.is_empty());
    assert!(busy_seen.iter().all(|busy| *busy));
    assert!(!h.session.gate().is_busy());

    // 다른 곳에서 게이트를 잡고 있으면 제출은 아무 효과가 없다.
    let gate = h.session.gate();
    let held = gate.try_acquire().expect("gate free after completion");
    let before = h.texts();
    assert_eq!(h.session.submit("help").await, Submission::Busy);
    assert_eq!(h.texts(), before);
    assert!(gate.is_busy());
    drop(held);

    assert_eq!(h.session.submit("help").await, Submission::Completed);
}

#[tokio::test(start_paused = true)]
async fn typewriter_glitches_resolve_to_the_real_text() {
    let settings = TypewriterSettings {
        glitch_chance: 1.0,
        ..TypewriterSettings::default()
    };
    let mut h = Harness::new(library(), MemoryStore::default(), settings);

    h.session.submit("theme amber").await;

    let target = "Theme set to 'amber'.";
    let frames = h.screen.frames.lock().unwrap().clone();
    let updates: Vec<String> = frames
        .iter()
        .filter_map(|f| match f {
            Frame::Update(line) if line.kind == LineKind::System => Some(line.text.clone()),
            _ => None,
        })
        .collect();

    let glitch_frames = updates
        .iter()
        .filter(|text| !target.starts_with(text.as_str()))
        .count();
    assert!(glitch_frames > 0);
    for text in &updates {
        let mut chars: Vec<char> = text.chars().collect();
        if !target.starts_with(text.as_str()) {
            let glyph = chars.pop().unwrap();
            assert!(DEFAULT_GLITCH_CHARS.contains(glyph), "{text}");
            let prefix: String = chars.into_iter().collect();
            assert!(target.starts_with(&prefix));
        }
    }

    let last = h.session.transcript().last().unwrap();
    assert_eq!(last.text, target);
    assert!(h.session.transcript().lines().iter().all(|l| !l.is_typing));
}

#[tokio::test(start_paused = true)]
async fn remote_failures_become_single_error_lines() {
    let api = FakeApi {
        offline: true,
        ..FakeApi::default()
    };
    let mut h = Harness::instant(api);

    for (input, message) in [
        ("motd", "Error: Could not retrieve Message of the Day."),
        ("latest", "Error: Could not fetch latest volume."),
        ("random", "Error: Could not fetch random volume."),
        ("search moon", "Error during search."),
        ("catalogue", "Error: Could not fetch volume catalogue."),
        ("stats 4", "Error: Could not retrieve stats for Volume 4."),
        ("rate 4 40", "Error submitting rating."),
    ] {
        let before = h.session.transcript().len();
        assert_eq!(h.session.submit(input).await, Submission::Completed);
        let added = h.lines_since(before);
        assert_eq!(added.len(), 2, "{input}");
        assert_eq!(added[1].kind, LineKind::Error);
        assert_eq!(added[1].text, message);
    }
}

#[tokio::test(start_paused = true)]
async fn catalogue_not_found_points_at_api_base() {
    let api = FakeApi {
        catalogue_missing: true,
        ..FakeApi::default()
    };
    let mut h = Harness::instant(api);

    h.session.submit("catalogue").await;
    let last = h.session.transcript().last().unwrap();
    assert!(last.text.starts_with(
        "404 Not Found at http://fake.test/api/public/volumes/catalogue."
    ));
}

#[tokio::test(start_paused = true)]
async fn search_and_catalogue_list_volumes() {
    let mut h = Harness::instant(library());

    h.session.submit("search Blue").await;
    let texts = h.texts();
    assert_eq!(
        &texts[texts.len() - 2..],
        &["--- Search results for \"Blue\" ---", "Volume 8: Blue Monday"]
    );

    h.session.submit("search zebra").await;
    assert_eq!(
        h.session.transcript().last().map(|l| l.text.as_str()),
        Some("No matching volumes found.")
    );

    h.session.submit("catalogue").await;
    let texts = h.texts();
    assert_eq!(
        &texts[texts.len() - 3..],
        &[
            "--- Published Volumes ---",
            "Volume 3: Night Shift",
            "Volume 8: Blue Monday"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn motd_combines_item_and_description() {
    let mut h = Harness::instant(FakeApi::default());
    h.session.submit("blessing").await;

    let last = h.session.transcript().last().unwrap();
    assert_eq!(last.kind, LineKind::System);
    assert_eq!(last.text, "[Random Blessing] - Golden Shovel (dig deeper)");
}

#[tokio::test(start_paused = true)]
async fn empty_input_changes_nothing() {
    let mut h = Harness::instant(FakeApi::default());
    h.session.show_banner();
    let before = h.texts();

    assert_eq!(h.session.submit("   ").await, Submission::Ignored);
    assert_eq!(h.texts(), before);
}

#[tokio::test(start_paused = true)]
async fn unknown_command_is_reported_inline() {
    let mut h = Harness::instant(FakeApi::default());
    h.session.submit("sudo make me a sandwich").await;

    let added = h.lines_since(0);
    assert_eq!(added.len(), 2);
    assert_eq!(
        added[1].text,
        "Command not found: sudo make me a sandwich. Type 'help' for a list of commands."
    );
}

#[tokio::test(start_paused = true)]
async fn export_writes_through_the_exporter() {
    let mut h = Harness::instant(library());
    h.session.submit("export 2 5").await;

    let files = h.exporter.files.lock().unwrap().clone();
    assert_eq!(
        files,
        vec![(
            "Abel_Experience_Export_2-5.txt".to_string(),
            "volumes 2..=5".to_string()
        )]
    );
    let texts = h.texts();
    assert_eq!(texts[1], "Exporting volumes 2 to 5...");
    assert_eq!(
        texts[2],
        "Export complete. Saved to /exports/Abel_Experience_Export_2-5.txt."
    );
}

#[tokio::test(start_paused = true)]
async fn voidz_scrambles_into_phrases() {
    let mut h = Harness::new(
        FakeApi::default(),
        MemoryStore::default(),
        TypewriterSettings::default(),
    );
    h.session.submit("voidz").await;

    let added: Vec<String> = h.lines_since(1).into_iter().map(|l| l.text).collect();
    assert_eq!(added, crate::domain::texts::VOIDZ_PHRASES.to_vec());
    assert!(h.session.transcript().typing_line().is_none());
}

#[tokio::test(start_paused = true)]
async fn voidz_volume_keeps_render_order() {
    let mut h = Harness::instant(library());
    h.session.submit("voidz 3").await;

    let added: Vec<String> = h.lines_since(1).into_iter().map(|l| l.text).collect();
    assert_eq!(added[0], "--- VOIDZ ACCESS: Volume 3: Night Shift ---");
    assert_eq!(&added[1..4], &["> a", "", "> b"]);
}

#[tokio::test(start_paused = true)]
async fn stats_show_engagement() {
    let mut api = library();
    if let Some(v) = api.volumes.get_mut(&3) {
        v.favorite_count = Some(12);
        v.rating_count = Some(3);
        v.average_rating = Some(71.0);
    }
    let mut h = Harness::instant(api);
    h.session.submit("stats 3").await;

    let texts = h.texts();
    assert_eq!(
        &texts[1..],
        &[
            "--- STATISTICS FOR VOLUME 3 ---",
            "Title: Night Shift",
            "Times Favorited: 12",
            "Number of Ratings: 3",
            "Average Rating: 71.0 / 100",
        ]
    );
}
