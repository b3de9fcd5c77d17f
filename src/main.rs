//! GDG Settings entry point
//!
//! Reads the page's declared view, binds it to LocalStorage and wires the
//! DOM events to the binders.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, EventTarget, HtmlInputElement, HtmlTextAreaElement};

    use gdg_settings::consts::{HIDDEN_CLASS, VIEW_ATTRIBUTE};
    use gdg_settings::forms::{Checkbox, NumberInput, SettingsControls};
    use gdg_settings::profile::{ProfileDisplay, ProfileInputs};
    use gdg_settings::storage::LocalStorage;
    use gdg_settings::theme::BodyClassTheme;
    use gdg_settings::{AppError, Page, Persistence, ProfileBinder, SettingsBinder, View};

    type Profile = ProfileBinder<LocalStorage, BodyClassTheme>;
    type Settings = SettingsBinder<LocalStorage, BodyClassTheme>;

    // Element ids the page markup must provide
    mod ids {
        pub const DISPLAY_NAME: &str = "displayName";
        pub const DISPLAY_EMAIL: &str = "displayEmail";
        pub const DISPLAY_BIO: &str = "displayBio";
        pub const AVATAR: &str = "avatar";
        pub const EDIT_BTN: &str = "editBtn";
        pub const EDIT_FORM: &str = "editForm";
        pub const NAME_INPUT: &str = "nameInput";
        pub const EMAIL_INPUT: &str = "emailInput";
        pub const BIO_INPUT: &str = "bioInput";
        pub const AVATAR_INPUT: &str = "avatarInput";
        pub const SAVE_PROFILE: &str = "saveProfile";
        pub const CANCEL_EDIT: &str = "cancelEdit";

        pub const DARK_MODE: &str = "darkMode";
        pub const EMAIL_NOTIF: &str = "emailNotif";
        pub const ITEMS_PER_PAGE: &str = "itemsPerPage";
        pub const RATE_LIMIT_ENABLED: &str = "rateLimitEnabled";
        pub const REQUESTS_PER_MINUTE: &str = "requestsPerMinute";
        pub const MAX_CONNECTIONS: &str = "maxConnections";
        pub const ANALYTICS_ENABLED: &str = "analyticsEnabled";
        pub const PERFORMANCE_METRICS: &str = "performanceMetrics";
        pub const USER_BEHAVIOR: &str = "userBehavior";
        pub const DATA_RETENTION: &str = "dataRetention";
        pub const SAVE_SETTINGS: &str = "saveSettings";
        pub const SETTINGS_MSG: &str = "settingsMsg";
    }

    fn element(document: &Document, id: &str) -> Result<Element, AppError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| AppError::MissingElement(id.to_string()))
    }

    fn input(document: &Document, id: &str) -> Result<HtmlInputElement, AppError> {
        element(document, id)?
            .dyn_into()
            .map_err(|_| AppError::WrongElementType(id.to_string()))
    }

    /// Register an event handler for the lifetime of the page
    fn on(target: &EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        if let Err(err) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to attach '{}' handler: {:?}", event, err);
        }
        closure.forget();
    }

    /// `<input>` or `<textarea>`
    #[derive(Clone)]
    enum TextField {
        Input(HtmlInputElement),
        Area(HtmlTextAreaElement),
    }

    impl TextField {
        fn find(document: &Document, id: &str) -> Result<Self, AppError> {
            match element(document, id)?.dyn_into::<HtmlInputElement>() {
                Ok(input) => Ok(Self::Input(input)),
                Err(el) => el
                    .dyn_into::<HtmlTextAreaElement>()
                    .map(Self::Area)
                    .map_err(|_| AppError::WrongElementType(id.to_string())),
            }
        }

        fn value(&self) -> String {
            match self {
                Self::Input(el) => el.value(),
                Self::Area(el) => el.value(),
            }
        }

        fn set_value(&self, value: &str) {
            match self {
                Self::Input(el) => el.set_value(value),
                Self::Area(el) => el.set_value(value),
            }
        }
    }

    #[derive(Clone)]
    struct ProfileElements {
        display_name: Element,
        display_email: Element,
        display_bio: Element,
        avatar: Element,
        edit_form: Element,
        name: TextField,
        email: TextField,
        bio: TextField,
        avatar_url: TextField,
    }

    impl ProfileElements {
        fn find(document: &Document) -> Result<Self, AppError> {
            Ok(Self {
                display_name: element(document, ids::DISPLAY_NAME)?,
                display_email: element(document, ids::DISPLAY_EMAIL)?,
                display_bio: element(document, ids::DISPLAY_BIO)?,
                avatar: element(document, ids::AVATAR)?,
                edit_form: element(document, ids::EDIT_FORM)?,
                name: TextField::find(document, ids::NAME_INPUT)?,
                email: TextField::find(document, ids::EMAIL_INPUT)?,
                bio: TextField::find(document, ids::BIO_INPUT)?,
                avatar_url: TextField::find(document, ids::AVATAR_INPUT)?,
            })
        }

        fn render(&self, display: &ProfileDisplay) {
            self.display_name.set_text_content(Some(&display.name));
            self.display_email.set_text_content(Some(&display.email));
            self.display_bio.set_text_content(Some(&display.bio));
            let _ = self.avatar.set_attribute("src", &display.avatar_src);
        }

        fn open_form(&self, inputs: &ProfileInputs) {
            self.name.set_value(&inputs.name);
            self.email.set_value(&inputs.email);
            self.bio.set_value(&inputs.bio);
            self.avatar_url.set_value(&inputs.avatar);
            let _ = self.edit_form.class_list().remove_1(HIDDEN_CLASS);
        }

        fn close_form(&self) {
            let _ = self.edit_form.class_list().add_1(HIDDEN_CLASS);
        }

        fn read_inputs(&self) -> ProfileInputs {
            ProfileInputs {
                name: self.name.value(),
                email: self.email.value(),
                bio: self.bio.value(),
                avatar: self.avatar_url.value(),
            }
        }
    }

    fn setup_profile(document: &Document, binder: Profile) -> Result<(), AppError> {
        let elements = ProfileElements::find(document)?;
        let edit_btn = element(document, ids::EDIT_BTN)?;
        let save_btn = element(document, ids::SAVE_PROFILE)?;
        let cancel_btn = element(document, ids::CANCEL_EDIT)?;

        elements.render(&binder.display());
        let binder = Rc::new(RefCell::new(binder));

        // Edit
        {
            let binder = binder.clone();
            let elements = elements.clone();
            on(&edit_btn, "click", move || {
                let inputs = binder.borrow_mut().begin_edit();
                elements.open_form(&inputs);
            });
        }

        // Cancel
        {
            let binder = binder.clone();
            let elements = elements.clone();
            on(&cancel_btn, "click", move || {
                binder.borrow_mut().cancel();
                elements.close_form();
            });
        }

        // Save
        on(&save_btn, "click", move || {
            let inputs = elements.read_inputs();
            let mut b = binder.borrow_mut();
            if let Err(err) = b.commit(&inputs) {
                log::warn!("Failed to save profile: {}", err);
            }
            elements.render(&b.display());
            elements.close_form();
        });

        log::info!("Profile view bound");
        Ok(())
    }

    #[derive(Clone)]
    struct SettingsElements {
        dark_mode: HtmlInputElement,
        email_notif: HtmlInputElement,
        items_per_page: HtmlInputElement,
        rate_limit_enabled: HtmlInputElement,
        requests_per_minute: HtmlInputElement,
        max_connections: HtmlInputElement,
        analytics_enabled: HtmlInputElement,
        performance_metrics: HtmlInputElement,
        user_behavior: HtmlInputElement,
        data_retention: HtmlInputElement,
        message: Element,
    }

    fn write_checkbox(el: &HtmlInputElement, control: &Checkbox) {
        el.set_checked(control.checked);
        el.set_disabled(control.disabled);
    }

    fn write_number(el: &HtmlInputElement, control: &NumberInput) {
        el.set_value(&control.value);
        el.set_disabled(control.disabled);
    }

    fn read_checkbox(el: &HtmlInputElement) -> Checkbox {
        Checkbox {
            checked: el.checked(),
            disabled: el.disabled(),
        }
    }

    fn read_number(el: &HtmlInputElement) -> NumberInput {
        NumberInput {
            value: el.value(),
            disabled: el.disabled(),
        }
    }

    impl SettingsElements {
        fn find(document: &Document) -> Result<Self, AppError> {
            Ok(Self {
                dark_mode: input(document, ids::DARK_MODE)?,
                email_notif: input(document, ids::EMAIL_NOTIF)?,
                items_per_page: input(document, ids::ITEMS_PER_PAGE)?,
                rate_limit_enabled: input(document, ids::RATE_LIMIT_ENABLED)?,
                requests_per_minute: input(document, ids::REQUESTS_PER_MINUTE)?,
                max_connections: input(document, ids::MAX_CONNECTIONS)?,
                analytics_enabled: input(document, ids::ANALYTICS_ENABLED)?,
                performance_metrics: input(document, ids::PERFORMANCE_METRICS)?,
                user_behavior: input(document, ids::USER_BEHAVIOR)?,
                data_retention: input(document, ids::DATA_RETENTION)?,
                message: element(document, ids::SETTINGS_MSG)?,
            })
        }

        fn write(&self, c: &SettingsControls) {
            write_checkbox(&self.dark_mode, &c.dark_mode);
            write_checkbox(&self.email_notif, &c.email_notif);
            write_number(&self.items_per_page, &c.items_per_page);
            write_checkbox(&self.rate_limit_enabled, &c.rate_limit_enabled);
            write_number(&self.requests_per_minute, &c.requests_per_minute);
            write_number(&self.max_connections, &c.max_connections);
            write_checkbox(&self.analytics_enabled, &c.analytics_enabled);
            write_checkbox(&self.performance_metrics, &c.performance_metrics);
            write_checkbox(&self.user_behavior, &c.user_behavior);
            write_number(&self.data_retention, &c.data_retention);
        }

        fn read(&self) -> SettingsControls {
            SettingsControls {
                dark_mode: read_checkbox(&self.dark_mode),
                email_notif: read_checkbox(&self.email_notif),
                items_per_page: read_number(&self.items_per_page),
                rate_limit_enabled: read_checkbox(&self.rate_limit_enabled),
                requests_per_minute: read_number(&self.requests_per_minute),
                max_connections: read_number(&self.max_connections),
                analytics_enabled: read_checkbox(&self.analytics_enabled),
                performance_metrics: read_checkbox(&self.performance_metrics),
                user_behavior: read_checkbox(&self.user_behavior),
                data_retention: read_number(&self.data_retention),
            }
        }

        fn show_message(&self, text: &str) {
            self.message.set_text_content(Some(text));
        }
    }

    /// One-shot timer clearing the confirmation message
    fn schedule_message_clear(
        binder: Rc<RefCell<Settings>>,
        elements: SettingsElements,
        delay: Duration,
    ) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let mut b = binder.borrow_mut();
            b.clear_message();
            elements.show_message(b.message());
        });
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        {
            log::warn!("Failed to schedule message clear: {:?}", err);
        }
    }

    fn setup_settings(document: &Document, binder: Settings) -> Result<(), AppError> {
        let elements = SettingsElements::find(document)?;
        let save_btn = element(document, ids::SAVE_SETTINGS)?;

        elements.write(binder.controls());
        let binder = Rc::new(RefCell::new(binder));

        // Analytics gates its detail controls
        {
            let binder = binder.clone();
            let elements = elements.clone();
            let target = elements.analytics_enabled.clone();
            on(&target, "change", move || {
                let mut b = binder.borrow_mut();
                *b.controls_mut() = elements.read();
                b.set_analytics_enabled(elements.analytics_enabled.checked());
                elements.write(b.controls());
            });
        }

        // Rate limiting gates requests per minute
        {
            let binder = binder.clone();
            let elements = elements.clone();
            let target = elements.rate_limit_enabled.clone();
            on(&target, "change", move || {
                let mut b = binder.borrow_mut();
                *b.controls_mut() = elements.read();
                b.set_rate_limit_enabled(elements.rate_limit_enabled.checked());
                elements.write(b.controls());
            });
        }

        // Save
        on(&save_btn, "click", move || {
            let mut b = binder.borrow_mut();
            *b.controls_mut() = elements.read();
            match b.save() {
                Ok(delay) => {
                    elements.show_message(b.message());
                    schedule_message_clear(binder.clone(), elements.clone(), delay);
                }
                Err(err) => log::warn!("Failed to save settings: {}", err),
            }
        });

        log::info!("Settings view bound");
        Ok(())
    }

    pub fn run() -> Result<(), AppError> {
        let window = web_sys::window().ok_or(AppError::NoWindow)?;
        let document = window.document().ok_or(AppError::NoWindow)?;
        let body = document
            .body()
            .ok_or_else(|| AppError::MissingElement("body".to_string()))?;

        let view = body
            .get_attribute(VIEW_ATTRIBUTE)
            .as_deref()
            .and_then(View::from_str);
        let persistence = Persistence::new(LocalStorage::open()?, BodyClassTheme::new(body));

        match Page::init(view, persistence) {
            Some(Page::Profile(binder)) => setup_profile(&document, binder),
            Some(Page::Settings(binder)) => setup_settings(&document, binder),
            None => Ok(()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("GDG Settings starting...");

    if let Err(err) = wasm_app::run() {
        log::error!("Page setup failed: {}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gdg_settings::consts::{PREFS_KEY, USER_KEY};
    use gdg_settings::{MemoryStore, Persistence, ThemeFlag};

    env_logger::init();
    log::info!("GDG Settings (native) starting...");
    log::info!("Native mode has no DOM - build for wasm32 to bind the settings pages");

    let persistence = Persistence::new(MemoryStore::new(), ThemeFlag::new());
    persistence.apply_stored_theme();

    let user = serde_json::to_string_pretty(&persistence.load_user());
    let prefs = serde_json::to_string_pretty(&persistence.load_prefs());
    match (user, prefs) {
        (Ok(user), Ok(prefs)) => {
            println!("{}: {}", USER_KEY, user);
            println!("{}: {}", PREFS_KEY, prefs);
        }
        (Err(err), _) | (_, Err(err)) => log::error!("Failed to serialize records: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
