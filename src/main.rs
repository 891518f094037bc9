use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{container, text, Column};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;

// Declare the application modules
mod api;
mod settings;
mod state;
mod ui;

use api::types::{FolderContents, Owner, PermissionSet};
use api::{ApiClient, ApiError};
use settings::Settings;
use state::mutation::{Mutations, PermissionField, Prompt};
use state::nav::{Navigator, Transition};
use state::path;

/// Pixel size requested for the single-photo view
const PHOTO_SIZE: u32 = 1024;

/// Pixel size requested for grid thumbnails
const THUMBNAIL_SIZE: u32 = 256;

/// Main application state
pub struct GalleryBrowser {
    /// Client for the photo store's REST API
    api: ApiClient,
    /// The navigation state machine
    nav: Navigator,
    /// Pending mutation prompts and their sequencing
    mutations: Mutations,
    /// Downloaded rendition of the currently viewed photo, keyed by its path
    photo: Option<(String, Handle)>,
    /// Thumbnails for the displayed folder, keyed by entry path
    thumbnails: HashMap<String, Handle>,
    /// The folder the thumbnails belong to
    thumbnail_folder: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User opened a folder or a photo (forward navigation)
    ShowEntry(String),
    /// User clicked a breadcrumb prefix (backward navigation)
    CrumbClicked(String),
    /// User navigated to the root folder
    GoHome,
    /// User asked for the next photo in the folder
    ShowNext,
    /// User asked for the previous photo in the folder
    ShowPrevious,
    /// The transition hint has been observed once and resets
    TransitionSettled,
    /// A folder listing arrived
    ContentsLoaded {
        folder: String,
        result: Result<FolderContents, ApiError>,
    },
    /// The current photo's rendition arrived
    PhotoLoaded {
        path: String,
        result: Result<Vec<u8>, ApiError>,
    },
    /// A grid thumbnail arrived
    ThumbnailLoaded {
        folder: String,
        path: String,
        result: Result<Vec<u8>, ApiError>,
    },
    PromptAddFile,
    PickUpload,
    SubmitAddFile,
    PromptCreateFolder,
    FolderNameChanged(String),
    SubmitCreateFolder,
    PromptDelete(String),
    SubmitDelete,
    PromptManage,
    /// The sharing dialog's permission set arrived
    PermissionsLoaded {
        folder: String,
        result: Result<PermissionSet, ApiError>,
    },
    DescriptionChanged(String),
    OwnerSelected(Owner),
    AddPermission,
    RemovePermission(usize),
    PermissionToggled {
        index: usize,
        field: PermissionField,
        value: bool,
    },
    SubmitManage,
    /// An add/create/delete submission completed
    MutationDone {
        seq: u64,
        result: Result<FolderContents, ApiError>,
    },
    /// A permission update submission completed
    ManageDone {
        seq: u64,
        result: Result<PermissionSet, ApiError>,
    },
    CancelPrompt,
}

impl GalleryBrowser {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        println!("🖼  Gallery Browser connecting to {}", settings.server_url);

        let api = ApiClient::new(settings);
        let (nav, folder) = Navigator::new("/");

        let app = GalleryBrowser {
            api,
            nav,
            mutations: Mutations::new(),
            photo: None,
            thumbnails: HashMap::new(),
            thumbnail_folder: "/".to_string(),
            status: "Connecting…".to_string(),
        };
        let fetch = app.fetch_contents(folder);
        (app, fetch)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowEntry(target) => {
                let fetch = self.nav.show(&target);
                self.navigated(fetch)
            }
            Message::CrumbClicked(target) => {
                let fetch = self.nav.show_crumb(&target);
                self.navigated(fetch)
            }
            Message::GoHome => {
                let fetch = self.nav.go_home();
                self.navigated(fetch)
            }
            Message::ShowNext => {
                let fetch = self.nav.show_next();
                self.navigated(fetch)
            }
            Message::ShowPrevious => {
                let fetch = self.nav.show_previous();
                self.navigated(fetch)
            }
            Message::TransitionSettled => {
                self.nav.settle_transition();
                Task::none()
            }

            Message::ContentsLoaded { folder, result } => match result {
                Ok(contents) => {
                    if self.nav.contents_loaded(&folder, contents) {
                        let store = self.nav.folder();
                        self.status = format!(
                            "{} files, {} folders",
                            store.files().len(),
                            store.contents().map(|c| c.folders.len()).unwrap_or(0),
                        );
                        Task::batch([self.refresh_thumbnails(), self.refresh_photo()])
                    } else {
                        // Superseded response for a folder we already left
                        Task::none()
                    }
                }
                Err(err) => {
                    self.nav.fetch_failed(&folder);
                    self.status = format!("⚠️  Failed to load {}: {}", folder, err);
                    eprintln!("⚠️  Failed to load {}: {}", folder, err);
                    Task::none()
                }
            },

            Message::PhotoLoaded { path, result } => {
                let current = self.nav.current_photo().map(|p| path::rooted(&p.path));
                if current.as_deref() != Some(path.as_str()) {
                    // The user moved on before the download finished
                    return Task::none();
                }
                match result {
                    Ok(bytes) => self.photo = Some((path, Handle::from_bytes(bytes))),
                    Err(err) => self.status = format!("⚠️  Failed to load photo: {}", err),
                }
                Task::none()
            }

            Message::ThumbnailLoaded {
                folder,
                path,
                result,
            } => {
                if folder == self.thumbnail_folder {
                    // A failed thumbnail simply keeps its placeholder
                    if let Ok(bytes) = result {
                        self.thumbnails.insert(path, Handle::from_bytes(bytes));
                    }
                }
                Task::none()
            }

            Message::PromptAddFile => {
                self.mutations.prompt_add();
                Task::none()
            }
            Message::PickUpload => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Choose a photo to upload")
                    .pick_file();
                if let Some(file) = picked {
                    self.mutations.set_upload(file);
                }
                Task::none()
            }
            Message::SubmitAddFile => {
                let Some(file) = self.mutations.upload().cloned() else {
                    return Task::none();
                };
                self.status = format!("Uploading {}…", file.display());
                let folder = self.nav.current_folder_path();
                let seq = self.mutations.begin_submit();
                let api = self.api.clone();
                Task::perform(
                    async move { api.add_file(&folder, file).await },
                    move |result| Message::MutationDone { seq, result },
                )
            }

            Message::PromptCreateFolder => {
                self.mutations.prompt_create();
                Task::none()
            }
            Message::FolderNameChanged(name) => {
                self.mutations.set_folder_name(name);
                Task::none()
            }
            Message::SubmitCreateFolder => {
                let Some(name) = self.mutations.folder_name().map(str::to_string) else {
                    return Task::none();
                };
                let folder = self.nav.current_folder_path();
                let seq = self.mutations.begin_submit();
                let api = self.api.clone();
                Task::perform(
                    async move { api.add_folder(&folder, &name).await },
                    move |result| Message::MutationDone { seq, result },
                )
            }

            Message::PromptDelete(target) => {
                self.mutations.prompt_delete(&target);
                Task::none()
            }
            Message::SubmitDelete => {
                let Some(target) = self.mutations.delete_target().map(str::to_string) else {
                    return Task::none();
                };
                let seq = self.mutations.begin_submit();
                let api = self.api.clone();
                Task::perform(async move { api.delete(&target).await }, move |result| {
                    Message::MutationDone { seq, result }
                })
            }

            Message::PromptManage => {
                self.mutations.prompt_manage();
                let folder = self.nav.current_folder_path();
                let tag = folder.clone();
                let api = self.api.clone();
                Task::perform(
                    async move { api.permissions(&folder).await },
                    move |result| Message::PermissionsLoaded {
                        folder: tag.clone(),
                        result,
                    },
                )
            }
            Message::PermissionsLoaded { folder, result } => {
                if folder != self.nav.current_folder_path() {
                    return Task::none();
                }
                match result {
                    Ok(set) => self.mutations.permissions_loaded(set),
                    Err(err) => {
                        self.status = format!("⚠️  Failed to load sharing settings: {}", err)
                    }
                }
                Task::none()
            }
            Message::DescriptionChanged(description) => {
                self.mutations.set_description(description);
                Task::none()
            }
            Message::OwnerSelected(owner) => {
                self.mutations.select_owner(owner);
                Task::none()
            }
            Message::AddPermission => {
                self.mutations.add_permission();
                Task::none()
            }
            Message::RemovePermission(index) => {
                self.mutations.remove_permission(index);
                Task::none()
            }
            Message::PermissionToggled {
                index,
                field,
                value,
            } => {
                self.mutations.toggle_permission(index, field, value);
                Task::none()
            }
            Message::SubmitManage => {
                let Some(set) = self.mutations.manage_edit().cloned() else {
                    return Task::none();
                };
                let folder = self.nav.current_folder_path();
                let seq = self.mutations.begin_submit();
                let api = self.api.clone();
                Task::perform(
                    async move {
                        api.update_permissions(&folder, set.description, set.permissions)
                            .await
                    },
                    move |result| Message::ManageDone { seq, result },
                )
            }

            Message::MutationDone { seq, result } => match result {
                Ok(contents) => {
                    let was_delete =
                        matches!(self.mutations.prompt(), Some(Prompt::Delete { .. }));
                    if !self.mutations.submit_succeeded(seq) {
                        // Superseded by a newer submission
                        return Task::none();
                    }
                    if was_delete {
                        // The server answered with the parent folder's listing
                        self.nav.adopt(contents);
                        self.status = "Deleted.".to_string();
                        Task::batch([
                            self.refresh_thumbnails(),
                            self.refresh_photo(),
                            Task::done(Message::TransitionSettled),
                        ])
                    } else if path::rooted(&contents.path) == self.nav.current_folder_path() {
                        self.nav.apply_mutation(contents);
                        self.status = "Saved.".to_string();
                        Task::batch([self.refresh_thumbnails(), self.refresh_photo()])
                    } else {
                        // The user left the folder while the request was in
                        // flight; the navigation fetch will bring fresh state
                        Task::none()
                    }
                }
                Err(err) => {
                    // The prompt stays open so the user can retry
                    if self.mutations.submit_failed(seq) {
                        self.status = format!("⚠️  {}", err);
                        eprintln!("⚠️  Mutation failed: {}", err);
                    }
                    Task::none()
                }
            },

            Message::ManageDone { seq, result } => {
                match result {
                    Ok(set) => {
                        if self.mutations.manage_succeeded(seq, set) {
                            self.status = "Sharing updated.".to_string();
                        }
                    }
                    Err(err) => {
                        if self.mutations.submit_failed(seq) {
                            self.status = format!("⚠️  {}", err);
                        }
                    }
                }
                Task::none()
            }

            Message::CancelPrompt => {
                self.mutations.cancel();
                Task::none()
            }
        }
    }

    /// Follow up a navigation intent: fetch the target folder's listing,
    /// refresh the photo download, and settle the transition hint after the
    /// presentation layer got its one look at it
    fn navigated(&mut self, fetch: Option<String>) -> Task<Message> {
        let Some(folder) = fetch else {
            // The intent was a no-op (e.g. next photo at the end of a folder)
            return Task::none();
        };
        // Navigating away closes any open prompt
        self.mutations.cancel();
        Task::batch([
            self.fetch_contents(folder),
            self.refresh_photo(),
            Task::done(Message::TransitionSettled),
        ])
    }

    /// Launch the async listing fetch for a folder
    fn fetch_contents(&self, folder: String) -> Task<Message> {
        let api = self.api.clone();
        let tag = folder.clone();
        Task::perform(
            async move { api.contents(&folder).await },
            move |result| Message::ContentsLoaded {
                folder: tag.clone(),
                result,
            },
        )
    }

    /// Start downloading the current photo's rendition if it changed
    fn refresh_photo(&mut self) -> Task<Message> {
        let current = self.nav.current_photo().cloned();
        let Some(entry) = current else {
            self.photo = None;
            return Task::none();
        };
        if !entry.is_image() {
            self.photo = None;
            return Task::none();
        }

        let target = path::rooted(&entry.path);
        if self
            .photo
            .as_ref()
            .is_some_and(|(cached, _)| *cached == target)
        {
            return Task::none();
        }

        let api = self.api.clone();
        let tag = target.clone();
        Task::perform(
            async move { api.render(&target, PHOTO_SIZE).await },
            move |result| Message::PhotoLoaded {
                path: tag.clone(),
                result,
            },
        )
    }

    /// Start downloading thumbnails for files the grid has none for yet
    fn refresh_thumbnails(&mut self) -> Task<Message> {
        let folder = self.nav.current_folder_path();
        if folder != self.thumbnail_folder {
            self.thumbnails.clear();
            self.thumbnail_folder = folder.clone();
        }

        let mut downloads = Vec::new();
        for file in self.nav.folder().files().to_vec() {
            let key = path::rooted(&file.path);
            if self.thumbnails.contains_key(&key) {
                continue;
            }
            let api = self.api.clone();
            let tag_folder = folder.clone();
            let tag_path = key.clone();
            let future = async move {
                if file.is_image() {
                    api.render(&key, THUMBNAIL_SIZE).await
                } else {
                    // Non-image files show the server's mimetype icon
                    let icon = format!("img/mimetypes/{}", ui::format::file_icon(&file.name));
                    api.static_asset(&icon).await
                }
            };
            downloads.push(Task::perform(future, move |result| {
                Message::ThumbnailLoaded {
                    folder: tag_folder.clone(),
                    path: tag_path.clone(),
                    result,
                }
            }));
        }
        Task::batch(downloads)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let crumbs = ui::browser::breadcrumb_bar(&self.nav);
        let toolbar = ui::browser::toolbar(&self.nav);

        let body: Element<Message> = if let Some(prompt) = self.mutations.prompt() {
            ui::prompts::prompt_view(prompt)
        } else if self.nav.is_loading() && self.nav.folder().contents().is_none() {
            // First load: nothing trustworthy to show yet
            container(text("Loading…").size(20))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into()
        } else if self.nav.current_photo().is_some() {
            ui::photo::photo_view(&self.nav, self.photo.as_ref().map(|(_, handle)| handle))
        } else {
            ui::browser::folder_view(&self.nav, &self.thumbnails)
        };

        // The transition hint is visible for exactly one frame before it
        // settles back to none
        let status_line = match self.nav.transition() {
            Some(Transition::Forward) => format!("› {}", self.status),
            Some(Transition::Backward) => format!("‹ {}", self.status),
            None => self.status.clone(),
        };

        let mut page = Column::new()
            .spacing(12)
            .padding(16)
            .push(crumbs)
            .push(toolbar);
        if let Some(set) = self.mutations.permissions() {
            if !set.description.is_empty() {
                page = page.push(text(set.description.clone()).size(14));
            }
        }
        page.push(body).push(text(status_line).size(14)).into()
    }

    /// Window title, following the displayed path
    fn title(&self) -> String {
        if self.nav.view_path() == "/" {
            "Gallery Browser".to_string()
        } else {
            format!("Gallery Browser - {}", self.nav.view_path())
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        GalleryBrowser::title,
        GalleryBrowser::update,
        GalleryBrowser::view,
    )
    .theme(GalleryBrowser::theme)
    .centered()
    .run_with(GalleryBrowser::new)
}
