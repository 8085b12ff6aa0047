//! Session controller: screens, wallet, shop and level unlocks
//!
//! Everything here lives for one session only; nothing is written to disk.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::InputSnapshot;
use crate::renderer::vertex::color_or_white;
use crate::renderer::{SceneGeometry, SceneOptions, build_scene};
use crate::reward::coins_earned;
use crate::settings::Settings;
use crate::sim::{Arena, Engine, FrameResult, Theme, ThemeError, levels};

/// Coins granted for watching a rewarded clip
pub const BONUS_COINS: u64 = 50;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    GameOver,
    Shop,
}

/// A purchasable center colour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub name: String,
    pub color: String,
    pub cost: u64,
}

fn skin(id: &str, name: &str, color: &str, cost: u64) -> Skin {
    Skin {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        cost,
    }
}

/// Skin catalog, cheapest first
pub fn skins() -> Vec<Skin> {
    vec![
        skin("default", "Pure White", "#ffffff", 0),
        skin("gold", "Midas Gold", "#ffd700", 100),
        skin("neon_blue", "Cyber Blue", "#00ffff", 250),
        skin("neon_pink", "Hot Pink", "#ff00ff", 250),
        skin("crimson", "Blood Red", "#dc143c", 500),
        skin("emerald", "Emerald", "#50c878", 500),
        skin("void", "The Void", "#000000", 1000),
        skin("rainbow", "Rainbow", "#ff9900", 2000),
    ]
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no level with id {0:?}")]
    UnknownLevel(String),
    #[error("level {0:?} is locked")]
    LevelLocked(String),
    #[error("no skin with id {0:?}")]
    UnknownSkin(String),
    #[error("skin {0:?} is not owned")]
    SkinLocked(String),
    #[error("{0:?} is already owned")]
    AlreadyOwned(String),
    #[error("costs {cost} coins, wallet has {available}")]
    InsufficientFunds { cost: u64, available: u64 },
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// One play session
pub struct Session {
    screen: Screen,
    engine: Engine,
    terminal: Rc<Cell<Option<u64>>>,
    catalog: Vec<Theme>,
    theme: Theme,
    settings: Settings,
    currency: u64,
    last_score: u64,
    last_reward: u64,
    unlocked_levels: Vec<String>,
    unlocked_skins: Vec<String>,
    selected_skin: String,
}

impl Session {
    pub fn new(arena: Arena) -> Self {
        Self::from_engine(Engine::new(arena))
    }

    /// Session with reproducible wall patterns
    pub fn with_seed(arena: Arena, seed: u64) -> Self {
        Self::from_engine(Engine::with_seed(arena, seed))
    }

    fn from_engine(mut engine: Engine) -> Self {
        let terminal = Rc::new(Cell::new(None));
        let sink = terminal.clone();
        engine.on_terminal(move |score| sink.set(Some(score)));

        let catalog = levels();
        let theme = catalog[0].clone();
        Self {
            screen: Screen::Menu,
            engine,
            terminal,
            catalog,
            theme,
            settings: Settings::default(),
            currency: 0,
            last_score: 0,
            last_reward: 0,
            unlocked_levels: vec!["lvl_1".to_string(), "lvl_2".to_string()],
            unlocked_skins: vec!["default".to_string()],
            selected_skin: "default".to_string(),
        }
    }

    fn find_level(&self, id: &str) -> Result<&Theme, SessionError> {
        self.catalog
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SessionError::UnknownLevel(id.to_string()))
    }

    fn find_skin(id: &str) -> Result<Skin, SessionError> {
        skins()
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SessionError::UnknownSkin(id.to_string()))
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    /// Start a run on an unlocked level
    pub fn start_game(&mut self, level_id: &str) -> Result<(), SessionError> {
        let theme = self.find_level(level_id)?.clone();
        if !self.is_level_unlocked(level_id) {
            return Err(SessionError::LevelLocked(level_id.to_string()));
        }
        self.theme = theme;
        self.restart()
    }

    /// Start a fresh run on the current level
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.terminal.set(None);
        self.engine.reset(self.theme.config)?;
        self.last_score = 0;
        self.last_reward = 0;
        self.set_screen(Screen::Playing);
        Ok(())
    }

    pub fn go_to_menu(&mut self) {
        self.engine.stop();
        self.set_screen(Screen::Menu);
    }

    pub fn open_shop(&mut self) {
        self.engine.stop();
        self.set_screen(Screen::Shop);
    }

    /// Advance one frame while playing; otherwise report the frozen frame
    pub fn frame(&mut self, input: InputSnapshot) -> FrameResult {
        if self.screen != Screen::Playing {
            return self.engine.frame();
        }
        let frame = self.engine.step(input, self.settings.sensitivity);
        if let Some(score) = self.terminal.take() {
            self.handle_game_over(score);
        }
        frame
    }

    fn handle_game_over(&mut self, score: u64) {
        let reward = coins_earned(score, self.theme.coin_multiplier);
        self.last_score = score;
        self.last_reward = reward;
        self.currency += reward;
        log::info!(
            "Game over on {}: {:.2}s survived, +{} coins (wallet {})",
            self.theme.name,
            score as f32 / crate::consts::FRAMES_PER_SECOND as f32,
            reward,
            self.currency
        );
        self.set_screen(Screen::GameOver);
    }

    /// Scene geometry for `frame` with the equipped skin and settings
    pub fn scene(&self, frame: &FrameResult) -> SceneGeometry {
        let arena = self.engine.arena();
        build_scene(
            frame,
            &self.theme,
            &SceneOptions {
                width: arena.width,
                height: arena.height,
                skin_color: self.skin_color(),
                reduced_motion: self.settings.reduced_motion,
            },
        )
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.set_arena(Arena::new(width, height));
    }

    // === Shop ===

    pub fn buy_level(&mut self, level_id: &str) -> Result<(), SessionError> {
        let cost = self.find_level(level_id)?.unlock_cost;
        if self.is_level_unlocked(level_id) {
            return Err(SessionError::AlreadyOwned(level_id.to_string()));
        }
        self.spend(cost)?;
        self.unlocked_levels.push(level_id.to_string());
        log::info!("Unlocked level {} for {} coins", level_id, cost);
        Ok(())
    }

    pub fn buy_skin(&mut self, skin_id: &str) -> Result<(), SessionError> {
        let skin = Self::find_skin(skin_id)?;
        if self.is_skin_unlocked(skin_id) {
            return Err(SessionError::AlreadyOwned(skin_id.to_string()));
        }
        self.spend(skin.cost)?;
        self.unlocked_skins.push(skin.id);
        log::info!("Unlocked skin {} for {} coins", skin_id, skin.cost);
        Ok(())
    }

    pub fn equip_skin(&mut self, skin_id: &str) -> Result<(), SessionError> {
        Self::find_skin(skin_id)?;
        if !self.is_skin_unlocked(skin_id) {
            return Err(SessionError::SkinLocked(skin_id.to_string()));
        }
        self.selected_skin = skin_id.to_string();
        Ok(())
    }

    fn spend(&mut self, cost: u64) -> Result<(), SessionError> {
        if self.currency < cost {
            return Err(SessionError::InsufficientFunds {
                cost,
                available: self.currency,
            });
        }
        self.currency -= cost;
        Ok(())
    }

    // === Settings ===

    pub fn set_sensitivity(&mut self, value: f32) {
        self.settings.set_sensitivity(value);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.settings.reduced_motion = reduced_motion;
    }

    /// Replace all settings at once, e.g. from a host's saved copy
    pub fn apply_settings(&mut self, settings: Settings) {
        let sensitivity = settings.sensitivity;
        self.settings = settings;
        self.settings.set_sensitivity(sensitivity);
    }

    // === Wallet ===

    /// Credit coins earned outside a run
    pub fn grant_bonus(&mut self, amount: u64) {
        self.currency = self.currency.saturating_add(amount);
        log::info!("Bonus +{} coins (wallet {})", amount, self.currency);
    }

    // === Queries ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn catalog(&self) -> &[Theme] {
        &self.catalog
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    /// Score of the most recent finished run
    pub fn last_score(&self) -> u64 {
        self.last_score
    }

    /// Coins paid for the most recent finished run
    pub fn last_reward(&self) -> u64 {
        self.last_reward
    }

    pub fn is_level_unlocked(&self, level_id: &str) -> bool {
        self.unlocked_levels.iter().any(|id| id == level_id)
    }

    pub fn is_skin_unlocked(&self, skin_id: &str) -> bool {
        self.unlocked_skins.iter().any(|id| id == skin_id)
    }

    pub fn selected_skin(&self) -> &str {
        &self.selected_skin
    }

    /// Center colour of the equipped skin
    pub fn skin_color(&self) -> [f32; 4] {
        skins()
            .iter()
            .find(|s| s.id == self.selected_skin)
            .map(|s| color_or_white(&s.color))
            .unwrap_or(crate::renderer::vertex::colors::WHITE)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_seed(Arena::new(800.0, 600.0), 77)
    }

    fn play_until_over(session: &mut Session) -> FrameResult {
        for _ in 0..20_000 {
            let frame = session.frame(InputSnapshot::default());
            if frame.terminated {
                return frame;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_starts_in_menu_with_defaults() {
        let s = session();
        assert_eq!(s.screen(), Screen::Menu);
        assert_eq!(s.currency(), 0);
        assert!(s.is_level_unlocked("lvl_1"));
        assert!(s.is_level_unlocked("lvl_2"));
        assert!(!s.is_level_unlocked("lvl_3"));
        assert_eq!(s.selected_skin(), "default");
    }

    #[test]
    fn test_locked_and_unknown_levels() {
        let mut s = session();
        assert!(matches!(
            s.start_game("lvl_3"),
            Err(SessionError::LevelLocked(_))
        ));
        assert!(matches!(
            s.start_game("lvl_99"),
            Err(SessionError::UnknownLevel(_))
        ));
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn test_game_over_banks_reward() {
        let mut s = session();
        s.start_game("lvl_2").unwrap();
        assert_eq!(s.screen(), Screen::Playing);

        let frame = play_until_over(&mut s);
        assert_eq!(s.screen(), Screen::GameOver);
        assert_eq!(s.last_score(), frame.score);
        let expected = coins_earned(frame.score, 0.5);
        assert_eq!(s.last_reward(), expected);
        assert_eq!(s.currency(), expected);

        // Frozen after game over
        let again = s.frame(InputSnapshot {
            rotate_left: true,
            rotate_right: false,
        });
        assert_eq!(again, frame);
        assert_eq!(s.currency(), expected);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut s = session();
        s.start_game("lvl_1").unwrap();
        play_until_over(&mut s);
        s.restart().unwrap();
        assert_eq!(s.screen(), Screen::Playing);
        assert_eq!(s.engine().frame().score, 0);
        assert_eq!(s.last_score(), 0);
    }

    #[test]
    fn test_menu_and_shop_stop_the_engine() {
        let mut s = session();
        s.start_game("lvl_1").unwrap();
        s.frame(InputSnapshot::default());
        s.open_shop();
        assert_eq!(s.screen(), Screen::Shop);
        assert_eq!(s.frame(InputSnapshot::default()).frame_count, 0);
        s.go_to_menu();
        assert_eq!(s.screen(), Screen::Menu);
    }

    #[test]
    fn test_shop_purchases() {
        let mut s = session();
        assert!(matches!(
            s.buy_level("lvl_3"),
            Err(SessionError::InsufficientFunds {
                cost: 150,
                available: 0
            })
        ));
        assert!(matches!(
            s.buy_level("lvl_1"),
            Err(SessionError::AlreadyOwned(_))
        ));

        s.currency = 400;
        s.buy_level("lvl_3").unwrap();
        assert!(s.is_level_unlocked("lvl_3"));
        assert_eq!(s.currency(), 250);

        s.buy_skin("neon_blue").unwrap();
        assert_eq!(s.currency(), 0);
        assert!(matches!(
            s.buy_skin("gold"),
            Err(SessionError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            s.buy_skin("nope"),
            Err(SessionError::UnknownSkin(_))
        ));
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut s = session();
        assert!(matches!(
            s.equip_skin("gold"),
            Err(SessionError::SkinLocked(_))
        ));
        s.currency = 100;
        s.buy_skin("gold").unwrap();
        s.equip_skin("gold").unwrap();
        assert_eq!(s.selected_skin(), "gold");
        let c = s.skin_color();
        assert_eq!(c[0], 1.0);
        assert_eq!(c[2], 0.0);
    }

    #[test]
    fn test_sensitivity_slider_is_clamped() {
        let mut s = session();
        s.set_sensitivity(3.0);
        assert!((s.settings().sensitivity - 2.0).abs() < 1e-6);
        s.set_sensitivity(f32::NAN);
        assert_eq!(s.settings().sensitivity, 1.0);
        s.set_muted(true);
        assert!(s.settings().muted);
    }

    #[test]
    fn test_applied_settings_are_sanitised() {
        let mut s = session();
        s.apply_settings(Settings {
            sensitivity: f32::NAN,
            muted: true,
            reduced_motion: true,
        });
        assert_eq!(s.settings().sensitivity, 1.0);
        assert!(s.settings().muted);
        assert!(s.settings().reduced_motion);

        s.apply_settings(Settings {
            sensitivity: 0.1,
            ..Settings::default()
        });
        assert!((s.settings().sensitivity - 0.5).abs() < 1e-6);
        s.set_reduced_motion(true);
        assert!(s.settings().reduced_motion);
    }

    #[test]
    fn test_bonus_coins_fund_purchases() {
        let mut s = session();
        s.grant_bonus(BONUS_COINS);
        s.grant_bonus(BONUS_COINS);
        assert_eq!(s.currency(), 100);
        s.buy_skin("gold").unwrap();
        assert_eq!(s.currency(), 0);

        s.currency = u64::MAX - 10;
        s.grant_bonus(BONUS_COINS);
        assert_eq!(s.currency(), u64::MAX);
    }

    #[test]
    fn test_scene_uses_viewport() {
        let mut s = session();
        s.start_game("lvl_1").unwrap();
        let frame = s.frame(InputSnapshot::default());
        let scene = s.scene(&frame);
        assert_eq!(scene.player.len(), 3);
        s.resize(1600.0, 1200.0);
        assert!((s.engine().state().max_radius - 1000.0).abs() < 1e-3);
    }
}
