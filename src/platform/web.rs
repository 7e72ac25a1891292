//! DOM presenter
//!
//! Element ids match `index.html`. Missing elements are skipped rather than
//! treated as errors.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::audio::AudioManager;
use crate::consts::POINTS_POP_MS;
use crate::presenter::{Cue, Hud, LevelResults, Presenter};
use crate::settings::Settings;
use crate::sim::Position;

/// Set one inline style property, ignoring failures
fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

fn html(el: Option<Element>) -> Option<HtmlElement> {
    el.and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Presenter backed by the page's DOM and Web Audio
pub struct DomPresenter {
    document: Document,
    menu: Option<HtmlElement>,
    pizza: Option<HtmlElement>,
    game: Option<HtmlElement>,
    results: Option<HtmlElement>,
    audio: AudioManager,
    settings: Settings,
}

impl DomPresenter {
    pub fn new(document: Document, settings: Settings, seed: u64) -> Self {
        Self {
            menu: html(document.get_element_by_id("menu")),
            pizza: html(document.get_element_by_id("pizza")),
            game: html(document.get_element_by_id("game")),
            results: html(document.get_element_by_id("level-results")),
            audio: AudioManager::new(&settings, seed),
            settings,
            document,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ambient click sound, if enabled
    pub fn on_document_click(&mut self) {
        self.audio.resume();
        if self.settings.click_sound {
            self.audio.play(Cue::Drop);
        }
    }

    /// Show or hide the rules modal
    pub fn show_rules(&self, visible: bool) {
        if let Some(modal) = html(self.document.get_element_by_id("rules-modal")) {
            set_style(&modal, "display", if visible { "flex" } else { "none" });
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

impl Presenter for DomPresenter {
    fn show_target(&mut self, position: &Position) {
        let Some(pizza) = &self.pizza else { return };
        set_style(pizza, "top", &format!("{}%", position.top_pct));
        set_style(pizza, "left", &format!("{}%", position.left_pct));
        set_style(pizza, "transform", position.anchor_transform());
        set_style(pizza, "display", "block");
    }

    fn hide_target(&mut self) {
        if let Some(pizza) = &self.pizza {
            set_style(pizza, "display", "none");
        }
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.set_text("score", &hud.score_text());
        self.set_text("level", &hud.level_text());
        self.set_text("combo", &hud.combo_text());
        self.set_text("highscore", &hud.high_score_text());
    }

    fn show_results(&mut self, results: &LevelResults) {
        let Some(modal) = &self.results else { return };
        self.set_text("res-level", &format!("Level: {}", results.level));
        self.set_text("res-hits", &format!("Hits: {}", results.hits));
        self.set_text("res-score", &format!("Score: {}", results.score));
        self.set_text("res-points", &format!("Points: {}", results.points));
        set_style(modal, "display", "flex");
    }

    fn hide_results(&mut self) {
        if let Some(modal) = &self.results {
            set_style(modal, "display", "none");
        }
    }

    fn show_difficulty_notice(&mut self, level: u32) {
        if self.settings.difficulty_notices {
            self.alert(&format!("Level {}! Difficulty increased!", level));
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        self.audio.play(cue);
    }

    fn show_points(&mut self, points: u32) {
        let (Some(game), Some(pizza)) = (&self.game, &self.pizza) else {
            return;
        };
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            return;
        };

        let rect = pizza.get_bounding_client_rect();
        let parent = game.get_bounding_client_rect();
        let x = rect.left() + rect.width() / 2.0 - parent.left();
        let y = rect.top() + rect.height() / 2.0 - parent.top();

        el.set_class_name("points-pop");
        el.set_text_content(Some(&format!("+{}", points)));
        set_style(&el, "left", &format!("{}px", x));
        set_style(&el, "top", &format!("{}px", y));
        let _ = game.append_child(&el);

        let remove = wasm_bindgen::closure::Closure::once_into_js(move || el.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.unchecked_ref(),
                POINTS_POP_MS,
            );
        }
    }

    fn show_menu(&mut self, visible: bool) {
        if let Some(menu) = &self.menu {
            set_style(menu, "display", if visible { "block" } else { "none" });
        }
    }

    fn show_finished(&mut self) {
        self.alert("Congratulations! You finished all levels!");
    }
}
