use egui::{CursorIcon, Pos2, Sense, Ui};

use crate::surface::{ReorderItem, ReorderUi};

/// The draggable part of a row. [`Handle::ui`] draws it; rows drawn as the
/// floating copy or the dimmed placeholder get a non-interactive handle.
pub struct Handle<'a> {
    pub(crate) state: &'a mut ReorderUi,
    pub(crate) index: usize,
    pub(crate) placeholder: bool,
}

impl<'a> Handle<'a> {
    pub fn ui<T: ReorderItem>(self, ui: &mut Ui, item: &T, contents: impl FnOnce(&mut Ui)) {
        if self.placeholder {
            contents(ui);
            return;
        }

        let added = ui.scope(contents);
        let response = ui.interact(added.response.rect, item.id(), Sense::drag());

        if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        if response.drag_started() {
            // keep the floating copy anchored to where the row was grabbed
            let origin = added.response.rect.min.to_vec2();
            let grab = response
                .interact_pointer_pos()
                .unwrap_or(Pos2::ZERO)
                .to_vec2();
            self.state.drag_delta = Some(origin - grab);
            self.state.pending_source = Some(self.index);
        }
    }
}
