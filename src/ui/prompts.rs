/// Prompt dialogs for the mutating operations
///
/// Each dialog is a plain widget tree over the pending prompt's data; all
/// edits round-trip through messages, so a failed submission reopens with
/// everything the user already entered.

use std::path::Path;

use iced::widget::{button, checkbox, column, pick_list, row, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::api::types::{Owner, PermissionSet};
use crate::state::mutation::{PermissionField, Prompt};
use crate::Message;

/// Render the open prompt
pub fn prompt_view(prompt: &Prompt) -> Element<'static, Message> {
    match prompt {
        Prompt::AddFile { upload } => add_file_view(upload.as_deref()),
        Prompt::CreateFolder { name } => create_folder_view(name),
        Prompt::Delete { target } => delete_view(target),
        Prompt::Manage {
            permissions,
            pending_owner,
        } => manage_view(permissions.as_ref(), pending_owner.as_ref()),
    }
}

fn add_file_view(upload: Option<&Path>) -> Element<'static, Message> {
    let chosen = match upload {
        Some(file) => file.display().to_string(),
        None => "No file chosen".to_string(),
    };

    column![
        text("Add a photo").size(20),
        row![
            button(text("Choose file…").size(14)).on_press(Message::PickUpload),
            text(chosen).size(14),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            button(text("Upload").size(14))
                .on_press_maybe(upload.is_some().then_some(Message::SubmitAddFile)),
            button(text("Cancel").size(14)).on_press(Message::CancelPrompt),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .into()
}

fn create_folder_view(name: &str) -> Element<'static, Message> {
    let submittable = !name.trim().is_empty();

    column![
        text("Create a folder").size(20),
        text_input("Folder name", name)
            .on_input(Message::FolderNameChanged)
            .on_submit(Message::SubmitCreateFolder)
            .width(Length::Fixed(320.0)),
        row![
            button(text("Create").size(14))
                .on_press_maybe(submittable.then_some(Message::SubmitCreateFolder)),
            button(text("Cancel").size(14)).on_press(Message::CancelPrompt),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .into()
}

fn delete_view(target: &str) -> Element<'static, Message> {
    column![
        text("Delete").size(20),
        text(format!("Really delete {}?", target)).size(14),
        row![
            button(text("Delete").size(14)).on_press(Message::SubmitDelete),
            button(text("Cancel").size(14)).on_press(Message::CancelPrompt),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .into()
}

fn manage_view(
    permissions: Option<&PermissionSet>,
    pending_owner: Option<&Owner>,
) -> Element<'static, Message> {
    let Some(set) = permissions else {
        return column![
            text("Sharing").size(20),
            text("Loading sharing settings…").size(14),
            button(text("Cancel").size(14)).on_press(Message::CancelPrompt),
        ]
        .spacing(12)
        .into();
    };

    let mut rows = Column::new().spacing(6);
    for (index, record) in set.permissions.iter().enumerate() {
        rows = rows.push(
            row![
                text(record.owner.clone())
                    .size(14)
                    .width(Length::Fixed(160.0)),
                checkbox("read", record.can_read).on_toggle(move |value| {
                    Message::PermissionToggled {
                        index,
                        field: PermissionField::Read,
                        value,
                    }
                }),
                checkbox("write", record.can_write).on_toggle(move |value| {
                    Message::PermissionToggled {
                        index,
                        field: PermissionField::Write,
                        value,
                    }
                }),
                checkbox("manage", record.can_manage).on_toggle(move |value| {
                    Message::PermissionToggled {
                        index,
                        field: PermissionField::Manage,
                        value,
                    }
                }),
                button(text("Remove").size(12)).on_press(Message::RemovePermission(index)),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    let add_row = row![
        pick_list(
            set.owners.clone(),
            pending_owner.cloned(),
            Message::OwnerSelected,
        )
        .placeholder("Add an owner…"),
        button(text("Add").size(14))
            .on_press_maybe(pending_owner.is_some().then_some(Message::AddPermission)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    column![
        text("Sharing").size(20),
        text_input("Description", &set.description)
            .on_input(Message::DescriptionChanged)
            .width(Length::Fixed(320.0)),
        rows,
        add_row,
        row![
            button(text("Save").size(14)).on_press(Message::SubmitManage),
            button(text("Cancel").size(14)).on_press(Message::CancelPrompt),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .into()
}
