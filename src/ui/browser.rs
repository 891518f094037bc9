/// Folder browsing widgets
///
/// The breadcrumb bar, the toolbar with the mutating actions the user is
/// allowed to perform, and the folder grid with subfolders and files.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, scrollable, text, Column, Image, Row};
use iced::{Alignment, Element, Length};

use crate::api::types::{FileEntry, FolderEntry};
use crate::state::nav::Navigator;
use crate::state::path;
use crate::ui::format;
use crate::Message;

/// The breadcrumb trail for the current path
///
/// Every crumb but the last navigates backward to its prefix; the last one
/// is the current location and stays inert.
pub fn breadcrumb_bar(nav: &Navigator) -> Element<'static, Message> {
    let crumbs = nav.breadcrumbs();
    let last = crumbs.len() - 1;

    let mut bar = Row::new().spacing(6).align_y(Alignment::Center);
    for (index, crumb) in crumbs.into_iter().enumerate() {
        if index > 0 {
            bar = bar.push(text("/").size(14));
        }
        if index == last {
            bar = bar.push(text(crumb.name).size(14));
        } else if index == 0 {
            bar = bar.push(button(text(crumb.name).size(14)).on_press(Message::GoHome));
        } else {
            bar = bar.push(
                button(text(crumb.name).size(14)).on_press(Message::CrumbClicked(crumb.path)),
            );
        }
    }
    bar.into()
}

/// Actions available in the current folder, gated by its permission flags
pub fn toolbar(nav: &Navigator) -> Element<'static, Message> {
    let store = nav.folder();
    let mut bar = Row::new().spacing(8);
    if store.can_write() {
        bar = bar.push(button(text("Add photo").size(14)).on_press(Message::PromptAddFile));
        bar = bar.push(button(text("New folder").size(14)).on_press(Message::PromptCreateFolder));
    }
    if store.can_manage() {
        bar = bar.push(button(text("Sharing").size(14)).on_press(Message::PromptManage));
    }
    bar.into()
}

/// Grid of subfolders and files for the currently loaded folder
pub fn folder_view(
    nav: &Navigator,
    thumbnails: &HashMap<String, Handle>,
) -> Element<'static, Message> {
    let store = nav.folder();
    let can_write = store.can_write();

    let mut tiles: Vec<Element<'static, Message>> = Vec::new();
    if let Some(contents) = store.contents() {
        for folder in &contents.folders {
            tiles.push(folder_tile(folder, can_write));
        }
        for file in &contents.files {
            let thumbnail = thumbnails.get(&path::rooted(&file.path));
            tiles.push(file_tile(file, thumbnail, can_write));
        }
    }

    if tiles.is_empty() {
        return container(text("This folder is empty."))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into();
    }

    let grid = iced_aw::Wrap::with_elements(tiles)
        .spacing(12.0)
        .line_spacing(12.0);

    scrollable(container(grid).width(Length::Fill).padding(4))
        .height(Length::Fill)
        .into()
}

fn folder_tile(folder: &FolderEntry, can_write: bool) -> Element<'static, Message> {
    let target = path::rooted(&folder.path);

    let face = column![text("📁").size(48), text(folder.name.clone()).size(14)]
        .align_x(Alignment::Center)
        .spacing(4);

    let mut tile = Column::new()
        .align_x(Alignment::Center)
        .spacing(4)
        .push(button(face).on_press(Message::ShowEntry(target.clone())));
    if can_write {
        tile = tile.push(button(text("Delete").size(12)).on_press(Message::PromptDelete(target)));
    }
    tile.into()
}

fn file_tile(
    file: &FileEntry,
    thumbnail: Option<&Handle>,
    can_write: bool,
) -> Element<'static, Message> {
    let target = path::rooted(&file.path);

    let preview: Element<'static, Message> = match thumbnail {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fixed(140.0))
            .height(Length::Fixed(105.0))
            .into(),
        None => text(if file.is_image() { "🖼" } else { "📄" }).size(48).into(),
    };

    let face = column![
        preview,
        text(file.name.clone()).size(14),
        text(format::file_size(file.size)).size(12),
    ]
    .align_x(Alignment::Center)
    .spacing(4);

    // Only photos navigate; other files are plain listing entries
    let open = file.is_image().then(|| Message::ShowEntry(target.clone()));

    let mut tile = Column::new()
        .align_x(Alignment::Center)
        .spacing(4)
        .push(button(face).on_press_maybe(open));
    if can_write {
        tile = tile.push(button(text("Delete").size(12)).on_press(Message::PromptDelete(target)));
    }
    tile.into()
}
