use iced::widget::{button, column, container, horizontal_rule, row, text, text_input};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod config;
mod preview;
mod route;
mod state;
mod ui;

use config::{AppConfig, ThemeChoice};
use preview::{PreviewError, PreviewId, PreviewRegistry, Thumbnail};
use route::Route;
use state::catalog::Catalog;
use state::form::{FormMessage, FormOutcome, ProductForm};

/// Main application state
struct ProductCatalog {
    route: Route,
    /// Contents of the address bar
    address: String,
    /// The open product form (only while on the form route)
    form: Option<ProductForm>,
    /// Products saved this session
    catalog: Catalog,
    /// Preview handles shared by the form and the catalog
    previews: PreviewRegistry,
    config: AppConfig,
    config_path: Option<PathBuf>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    Navigate(Route),
    AddressChanged(String),
    /// Enter pressed in the address bar
    AddressSubmitted,
    Form(FormMessage),
    /// Background thumbnail decode finished
    ThumbnailReady(PreviewId, Result<Thumbnail, PreviewError>),
    EditProduct(String),
    DeleteProduct(String),
    ThemeSelected(ThemeChoice),
    ThumbnailSizeChanged(u32),
    SaveSettings,
}

impl ProductCatalog {
    fn new() -> (Self, Task<Message>) {
        let (config, config_path) = AppConfig::load_or_default();
        tracing::info!(theme = %config.theme, thumbnail_size = config.thumbnail_size, "product catalog started");

        (
            ProductCatalog {
                route: Route::Home,
                address: Route::Home.path(),
                form: None,
                catalog: Catalog::new(),
                previews: PreviewRegistry::new(),
                config,
                config_path,
                status: "Ready.".to_string(),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                self.navigate(route);
                Task::none()
            }
            Message::AddressChanged(address) => {
                self.address = address;
                Task::none()
            }
            Message::AddressSubmitted => {
                let route = Route::parse(&self.address);
                self.navigate(route);
                Task::none()
            }
            Message::Form(message) => self.update_form(message),
            Message::ThumbnailReady(id, result) => {
                match result {
                    Ok(thumbnail) => {
                        self.previews.attach_thumbnail(id, thumbnail);
                    }
                    Err(e) => {
                        // The lazily loaded file handle stays in place
                        tracing::warn!(%id, error = %e, "thumbnail decode failed");
                    }
                }
                Task::none()
            }
            Message::EditProduct(id) => {
                match self.catalog.get(&id) {
                    Some(entry) => {
                        let form = ProductForm::new(Some(entry.record.clone()));
                        self.close_form();
                        self.form = Some(form);
                        self.route = Route::ProductForm;
                        self.address = self.route.path();
                    }
                    None => {
                        tracing::warn!(%id, "edit requested for unknown product");
                        self.status = format!("Product {} not found.", id);
                    }
                }
                Task::none()
            }
            Message::DeleteProduct(id) => {
                if let Some(record) = self.catalog.remove(&id, &mut self.previews) {
                    self.status = format!("Deleted \"{}\".", record.display_title());
                }
                self.navigate(Route::ProductList);
                Task::none()
            }
            Message::ThemeSelected(theme) => {
                self.config.theme = theme;
                Task::none()
            }
            Message::ThumbnailSizeChanged(size) => {
                self.config.thumbnail_size = size;
                self.config.normalize();
                Task::none()
            }
            Message::SaveSettings => {
                if let Some(path) = &self.config_path {
                    self.status = match self.config.save(path) {
                        Ok(()) => "Settings saved.".to_string(),
                        Err(e) => {
                            tracing::error!(error = %e, "saving settings failed");
                            format!("Could not save settings: {}", e)
                        }
                    };
                }
                Task::none()
            }
        }
    }

    fn update_form(&mut self, message: FormMessage) -> Task<Message> {
        let outcome = match self.form.as_mut() {
            Some(form) => form.update(message, &mut self.previews),
            None => return Task::none(),
        };

        match outcome {
            None => Task::none(),
            Some(FormOutcome::PickRequested { multiple }) => {
                // Show the native file picker dialog
                let dialog = FileDialog::new()
                    .set_title("Select Product Images")
                    .add_filter("Images", self.config.image_extensions.as_slice());

                let files: Vec<PathBuf> = if multiple {
                    dialog.pick_files().unwrap_or_default()
                } else {
                    dialog.pick_file().into_iter().collect()
                };

                if files.is_empty() {
                    Task::none()
                } else {
                    self.update_form(FormMessage::FilesSelected(files))
                }
            }
            Some(FormOutcome::Staged(ids)) => {
                let size = self.config.thumbnail_size;
                let tasks: Vec<Task<Message>> = ids
                    .into_iter()
                    .filter_map(|id| self.previews.path(id).map(|path| (id, path.to_path_buf())))
                    .map(|(id, path)| {
                        Task::perform(preview::thumbnail::render_thumbnail(path, size), move |result| {
                            Message::ThumbnailReady(id, result)
                        })
                    })
                    .collect();
                Task::batch(tasks)
            }
            Some(FormOutcome::Submitted(record)) => {
                let title = record.display_title().to_string();
                let id = self.catalog.upsert(record, &mut self.previews);
                self.status = format!("Saved \"{}\".", title);
                self.navigate(Route::ProductDetail(id));
                Task::none()
            }
            Some(FormOutcome::Cancelled) => {
                self.navigate(Route::ProductList);
                Task::none()
            }
        }
    }

    /// Switch screens; leaving the form discards it.
    /// Navigating to the form route always opens a new product, so an open
    /// edit form is replaced; a new-product draft is kept.
    fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");

        if route != Route::ProductForm {
            self.close_form();
        } else if self.form.as_ref().map_or(true, ProductForm::is_editing) {
            self.close_form();
            self.form = Some(ProductForm::new(None));
        }
        self.address = route.path();
        self.route = route;
    }

    fn close_form(&mut self) {
        if let Some(form) = self.form.take() {
            form.discard(&mut self.previews);
            tracing::debug!(live_previews = self.previews.len(), "form closed");
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let tile_size = self.config.thumbnail_size as f32;

        let page: Element<Message> = match &self.route {
            Route::Home => ui::home::view(self.catalog.len()),
            Route::ProductForm => match &self.form {
                Some(form) => ui::form::view(form, &self.previews, tile_size).map(Message::Form),
                None => text("No form open.").into(),
            },
            Route::ProductList => ui::list::view(&self.catalog, &self.previews, tile_size),
            Route::ProductDetail(id) => match self.catalog.get(id) {
                Some(entry) => ui::detail::view(entry, &self.previews, tile_size),
                None => ui::detail::missing(id),
            },
            Route::Configuration => ui::settings::view(&self.config, self.config_path.as_deref()),
            Route::NotFound(path) => text(format!("Nothing at {}", path)).size(18).into(),
        };

        let nav = row![
            nav_button("Home", Route::Home, &self.route),
            nav_button("New Product", Route::ProductForm, &self.route),
            nav_button("Products", Route::ProductList, &self.route),
            nav_button("Configuration", Route::Configuration, &self.route),
        ]
        .push(
            text_input("/product-list", &self.address)
                .on_input(Message::AddressChanged)
                .on_submit(Message::AddressSubmitted)
                .width(Length::Fixed(260.0)),
        )
        .spacing(8)
        .padding(10);

        column![
            nav,
            horizontal_rule(1),
            container(page).width(Length::Fill).height(Length::Fill),
            horizontal_rule(1),
            container(text(&self.status).size(14)).padding(8),
        ]
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        self.config.theme.theme()
    }
}

fn nav_button<'a>(label: &'a str, route: Route, current: &Route) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if *current == route {
        button::primary
    } else {
        button::text
    };
    button(label)
        .on_press(Message::Navigate(route))
        .style(style)
        .into()
}

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application("Product Catalog", ProductCatalog::update, ProductCatalog::view)
        .theme(ProductCatalog::theme)
        .centered()
        .run_with(ProductCatalog::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::form::TextField;

    fn app() -> ProductCatalog {
        ProductCatalog {
            route: Route::Home,
            address: String::new(),
            form: None,
            catalog: Catalog::new(),
            previews: PreviewRegistry::new(),
            config: AppConfig::default(),
            config_path: None,
            status: String::new(),
        }
    }

    fn type_title(app: &mut ProductCatalog, title: &str) {
        let _ = app.update(Message::Form(FormMessage::TextChanged(TextField::Title, title.to_string())));
    }

    #[test]
    fn test_submit_registers_and_shows_detail() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        type_title(&mut app, "Olive oil");
        let _ = app.update(Message::Form(FormMessage::Submit));

        assert_eq!(app.catalog.len(), 1);
        let id = app.catalog.entries()[0].id().to_string();
        assert_eq!(app.route, Route::ProductDetail(id));
        assert!(app.form.is_none());
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        let _ = app.update(Message::Form(FormMessage::Submit));

        assert!(app.catalog.is_empty());
        assert_eq!(app.route, Route::ProductForm);
        assert!(app.form.as_ref().unwrap().has_errors());
    }

    #[test]
    fn test_leaving_form_releases_staged_previews() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        let _ = app.update(Message::Form(FormMessage::FilesSelected(vec![
            PathBuf::from("/tmp/a.png"),
            PathBuf::from("/tmp/b.png"),
        ])));
        assert_eq!(app.previews.len(), 2);

        let _ = app.update(Message::Navigate(Route::Home));
        assert!(app.previews.is_empty());
        assert!(app.form.is_none());
    }

    #[test]
    fn test_submitted_previews_stay_with_catalog() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        type_title(&mut app, "Soap");
        let _ = app.update(Message::Form(FormMessage::FilesSelected(vec![PathBuf::from("/tmp/soap.png")])));
        let _ = app.update(Message::Form(FormMessage::Submit));

        assert_eq!(app.previews.len(), 1);

        let id = app.catalog.entries()[0].id().to_string();
        let _ = app.update(Message::DeleteProduct(id));
        assert!(app.previews.is_empty());
    }

    #[test]
    fn test_edit_opens_existing_record() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        type_title(&mut app, "Jam");
        let _ = app.update(Message::Form(FormMessage::Submit));
        let id = app.catalog.entries()[0].id().to_string();

        let _ = app.update(Message::EditProduct(id.clone()));
        assert_eq!(app.route, Route::ProductForm);
        let form = app.form.as_ref().unwrap();
        assert!(form.is_editing());
        assert_eq!(form.record().title, "Jam");

        type_title(&mut app, "Fig jam");
        let _ = app.update(Message::Form(FormMessage::Submit));
        assert_eq!(app.catalog.len(), 1);
        assert_eq!(app.catalog.get(&id).unwrap().record.title, "Fig jam");
    }

    #[test]
    fn test_new_product_replaces_open_edit_form() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        type_title(&mut app, "Jam");
        let _ = app.update(Message::Form(FormMessage::Submit));
        let id = app.catalog.entries()[0].id().to_string();
        let _ = app.update(Message::EditProduct(id));
        assert!(app.form.as_ref().unwrap().is_editing());

        let _ = app.update(Message::Navigate(Route::ProductForm));

        let form = app.form.as_ref().unwrap();
        assert!(!form.is_editing());
        assert_eq!(form.record().title, "");
    }

    #[test]
    fn test_new_product_keeps_draft() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        type_title(&mut app, "Draft");
        let _ = app.update(Message::Navigate(Route::ProductForm));

        assert_eq!(app.form.as_ref().unwrap().record().title, "Draft");
    }

    #[test]
    fn test_address_bar_navigates() {
        let mut app = app();
        let _ = app.update(Message::AddressChanged("/configuration".to_string()));
        let _ = app.update(Message::AddressSubmitted);
        assert_eq!(app.route, Route::Configuration);

        let _ = app.update(Message::AddressChanged("/nowhere".to_string()));
        let _ = app.update(Message::AddressSubmitted);
        assert_eq!(app.route, Route::NotFound("/nowhere".to_string()));

        let _ = app.update(Message::Navigate(Route::ProductList));
        assert_eq!(app.address, "/product-list");
    }

    #[test]
    fn test_cancel_goes_to_list() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::ProductForm));
        let _ = app.update(Message::Form(FormMessage::Cancel));

        assert_eq!(app.route, Route::ProductList);
        assert!(app.form.is_none());
    }
}
