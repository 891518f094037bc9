/// Single-photo view
///
/// Shows the server-rendered photo for the current path with
/// previous/next navigation taken from the folder's adjacency.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, Image, Row, Space};
use iced::{Alignment, Element, Length};

use crate::state::nav::Navigator;
use crate::state::path;
use crate::ui::format;
use crate::Message;

/// Render the photo the view path points at
///
/// `photo` is the decoded rendition once its download finished; until then
/// a placeholder keeps the layout stable.
pub fn photo_view(nav: &Navigator, photo: Option<&Handle>) -> Element<'static, Message> {
    let Some(current) = nav.current_photo() else {
        // Adjacency has no match; the caller shows the folder view instead
        return container(text("No photo selected.")).padding(40).into();
    };

    let display: Element<'static, Message> = match photo {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(480.0))
            .into(),
        None => container(text("Loading photo…"))
            .width(Length::Fill)
            .height(Length::Fixed(480.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    // Buttons stay disabled at the ends of the folder's file list
    let previous = nav.previous_photo().map(|_| Message::ShowPrevious);
    let next = nav.next_photo().map(|_| Message::ShowNext);

    let controls = row![
        button(text("‹ Previous").size(14)).on_press_maybe(previous),
        Space::with_width(Length::Fill),
        button(text("Next ›").size(14)).on_press_maybe(next),
    ]
    .align_y(Alignment::Center);

    let mut caption_parts = vec![current.name.clone(), format::file_size(current.size)];
    if let Some(image) = &current.image {
        caption_parts.push(format::dimensions(image.size));
    }
    if let Some(mimetype) = &current.mimetype {
        caption_parts.push(mimetype.clone());
    }

    let mut caption = Row::new()
        .spacing(12)
        .align_y(Alignment::Center)
        .push(text(caption_parts.join(", ")).size(14));
    if nav.folder().can_write() {
        caption = caption.push(
            button(text("Delete").size(12))
                .on_press(Message::PromptDelete(path::rooted(&current.path))),
        );
    }

    column![controls, display, caption].spacing(12).into()
}
