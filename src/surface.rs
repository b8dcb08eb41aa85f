use std::hash::Hash;

use egui::{self, CursorIcon, Id, Order, Rect, Sense, Shape, Ui, Vec2};

use crate::handle::Handle;
use crate::list::ReorderList;

/// Gives a row a stable identity for the drag surface. Blanket-implemented
/// for anything hashable; hash only the stable part of an item (a name, a
/// database id) when its other fields can change mid-gesture.
pub trait ReorderItem {
    fn id(&self) -> Id;
}

impl<T: Hash> ReorderItem for T {
    fn id(&self) -> Id {
        Id::new(self)
    }
}

/// What the drag surface observed this frame.
///
/// Callers that do not install a reorder callback can watch for
/// [`ReorderResponse::Completed`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderResponse {
    /// No drag gesture in progress.
    Idle,
    /// The item at `source` is being dragged. `target` is the insertion slot
    /// under the pointer, in the index space of the sequence with the dragged
    /// item removed; `None` while the pointer is outside the list.
    Dragging {
        source: usize,
        target: Option<usize>,
    },
    /// The gesture finished on a target this frame. `changed` is `false` when
    /// the item was dropped back onto its own slot.
    Completed {
        from: usize,
        to: usize,
        changed: bool,
    },
    /// The gesture finished with no valid target.
    Canceled,
}

impl ReorderResponse {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// `(from, to)` of a drop that changed the order, if one completed this
    /// frame.
    pub fn completed(&self) -> Option<(usize, usize)> {
        match self {
            Self::Completed {
                from,
                to,
                changed: true,
            } => Some((*from, *to)),
            _ => None,
        }
    }
}

/// The drag surface for one [`ReorderList`].
///
/// Draws the rows, floats the dragged row under the pointer with a dimmed
/// placeholder left in its slot, paints a drop indicator at the hovered
/// insertion slot, and translates egui's per-frame input into the list's
/// gesture operations. Keep one `ReorderUi` per rendered list.
///
/// `item_ui` draws a single row. Its arguments are the row [`Ui`], a
/// [`Handle`] for the draggable part of the row, the row's index, and the
/// item itself.
///
/// # Example
/// ```no_run
/// use eframe::egui::CentralPanel;
/// use eframe::{App, Frame};
/// use egui_reorder::{ReorderList, ReorderUi};
///
/// struct SectionsApp {
///     sections: ReorderList<String>,
///     reorder: ReorderUi,
/// }
///
/// impl App for SectionsApp {
///     fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut Frame) {
///         CentralPanel::default().show(ctx, |ui| {
///             self.reorder.ui(ui, &mut self.sections, |ui, handle, _index, section| {
///                 ui.horizontal(|ui| {
///                     handle.ui(ui, section, |ui| {
///                         ui.label("grab");
///                     });
///                     ui.label(section.clone());
///                 });
///             });
///         });
///     }
/// }
///
/// fn main() -> Result<(), eframe::Error> {
///     let sections = ReorderList::new(vec![
///         "Experience".to_owned(),
///         "Education".to_owned(),
///         "Skills".to_owned(),
///     ]);
///     eframe::run_native(
///         "Sections",
///         eframe::NativeOptions::default(),
///         Box::new(|_| {
///             Box::new(SectionsApp {
///                 sections,
///                 reorder: ReorderUi::default(),
///             })
///         }),
///     )
/// }
/// ```
#[derive(Default, Clone)]
pub struct ReorderUi {
    /// Pointer position relative to the origin of the dragged row when the
    /// drag began, so the floating copy stays anchored to the grab point.
    pub(crate) drag_delta: Option<Vec2>,
    /// Row whose handle reported a drag start this frame.
    pub(crate) pending_source: Option<usize>,
}

impl ReorderUi {
    pub fn ui<T: ReorderItem>(
        &mut self,
        ui: &mut Ui,
        list: &mut ReorderList<T>,
        mut item_ui: impl FnMut(&mut Ui, Handle, usize, &T),
    ) -> ReorderResponse {
        let dragging = list.dragging_index();
        let mut row_rects = Vec::with_capacity(list.len());

        // draw rows inside a frame that lights up while a drag is in progress
        let frame_response = Self::draw_frame(ui, dragging.is_some(), |content_ui| {
            for (index, item) in list.items().iter().enumerate() {
                let rect = self.draw_row(
                    content_ui,
                    index,
                    dragging == Some(index),
                    item,
                    &mut item_ui,
                );
                row_rects.push(rect);
            }
        });

        // a drag begins the frame a handle reports one
        if let Some(source) = self.pending_source.take() {
            list.begin_drag(source);
        }

        let Some(source) = list.dragging_index() else {
            return ReorderResponse::Idle;
        };

        // insertion slot under the pointer, adjusted to the grab point
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let slot = pointer.and_then(|pos| {
            let pos = pos + self.drag_delta.unwrap_or(Vec2::ZERO);
            if frame_response.hovered() {
                insertion_slot(pos.y, &row_rects)
            } else {
                None
            }
        });
        let target = slot.map(|slot| slot_to_target(slot, source, list.len()));

        if let (Some(slot), Some(target)) = (slot, target) {
            list.drag_over(target);
            if target != source {
                draw_drop_indicator(ui, &row_rects, slot);
            }
        }

        let (released, any_down) = ui.input(|input| {
            (input.pointer.any_released(), input.pointer.any_down())
        });

        if released {
            self.drag_delta = None;
            return match target {
                // dropping a row onto its own slot is suppressed here as well
                Some(target) if target != source => {
                    let changed = list.complete_drop(source, target);
                    ReorderResponse::Completed {
                        from: source,
                        to: target,
                        changed,
                    }
                }
                Some(target) => {
                    list.cancel_drag();
                    ReorderResponse::Completed {
                        from: source,
                        to: target,
                        changed: false,
                    }
                }
                None => {
                    list.cancel_drag();
                    ReorderResponse::Canceled
                }
            };
        }

        if !any_down {
            // the release happened where we never saw it (e.g. outside the window)
            self.drag_delta = None;
            list.cancel_drag();
            return ReorderResponse::Canceled;
        }

        ReorderResponse::Dragging { source, target }
    }

    /// Draws a row either in place or, while it is being dragged, as a
    /// floating copy under the pointer with a dimmed placeholder keeping its
    /// slot occupied. Returns the rect the row occupies in the list.
    fn draw_row<T: ReorderItem>(
        &mut self,
        ui: &mut Ui,
        index: usize,
        is_dragged: bool,
        item: &T,
        item_ui: &mut impl FnMut(&mut Ui, Handle, usize, &T),
    ) -> Rect {
        if !is_dragged {
            let scope = ui.scope(|ui| {
                item_ui(
                    ui,
                    Handle {
                        state: self,
                        index,
                        placeholder: false,
                    },
                    index,
                    item,
                );
            });
            return scope.response.rect;
        }

        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);

        // the dragged row follows the pointer on its own layer
        let pointer_pos = ui
            .ctx()
            .pointer_interact_pos()
            .unwrap_or(ui.next_widget_position());
        let offset = self.drag_delta.unwrap_or(Vec2::ZERO);
        egui::Area::new(item.id().with("reorder_floating_row"))
            .interactable(false)
            .order(Order::Tooltip)
            .fixed_pos(pointer_pos + offset)
            .show(ui.ctx(), |floating_ui| {
                floating_ui.scope(|ui| {
                    item_ui(
                        ui,
                        Handle {
                            state: self,
                            index,
                            placeholder: true,
                        },
                        index,
                        item,
                    );
                });
            });

        // dimmed placeholder in the row's slot
        let scope = ui.scope(|ui| {
            ui.add_enabled_ui(false, |ui| {
                item_ui(
                    ui,
                    Handle {
                        state: self,
                        index,
                        placeholder: true,
                    },
                    index,
                    item,
                );
            });
        });
        scope.response.rect
    }

    /// Draws the list background and body, highlighting the background while
    /// the list is the drop target.
    fn draw_frame(ui: &mut Ui, active: bool, body: impl FnOnce(&mut Ui)) -> egui::Response {
        let margin = Vec2::splat(4.0);

        let outer_bounds = ui.available_rect_before_wrap();
        let inner_rect = outer_bounds.shrink2(margin);
        let background = ui.painter().add(Shape::Noop);

        let mut content_ui = ui.child_ui(inner_rect, *ui.layout());
        body(&mut content_ui);

        let outer_rect =
            Rect::from_min_max(outer_bounds.min, content_ui.min_rect().max + margin);
        let (rect, response) = ui.allocate_at_least(outer_rect.size(), Sense::hover());

        let style = if active && response.hovered() {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };
        ui.painter().set(
            background,
            epaint::RectShape::new(rect, style.rounding, style.bg_fill, style.bg_stroke),
        );

        response
    }
}

/// Insertion slot (`0..=rows.len()`) closest to `pointer_y`: above a row's
/// vertical center inserts before it, below inserts after. `None` when there
/// are no rows.
fn insertion_slot(pointer_y: f32, rows: &[Rect]) -> Option<usize> {
    let (index, rect) = rows.iter().enumerate().min_by(|(_, a), (_, b)| {
        let da = (a.center().y - pointer_y).abs();
        let db = (b.center().y - pointer_y).abs();
        da.total_cmp(&db)
    })?;

    if pointer_y > rect.center().y {
        Some(index + 1)
    } else {
        Some(index)
    }
}

/// Converts a slot between rendered rows into a target index in the sequence
/// as it looks after the dragged row is removed.
fn slot_to_target(slot: usize, source: usize, len: usize) -> usize {
    let target = if slot > source { slot - 1 } else { slot };
    target.min(len.saturating_sub(1))
}

/// Indicator line at the boundary of the hovered insertion slot.
fn draw_drop_indicator(ui: &Ui, rows: &[Rect], slot: usize) {
    let y = if slot < rows.len() {
        rows[slot].top() - 2.0
    } else if let Some(last) = rows.last() {
        last.bottom() + 2.0
    } else {
        return;
    };

    if let Some(first) = rows.first() {
        let stroke = ui.visuals().widgets.active.fg_stroke;
        ui.painter().hline(first.left()..=first.right(), y, stroke);
    }
}
