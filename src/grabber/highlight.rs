//! Hervorhebung des getroffenen Objekts.

use super::state::GrabberStateMachine;
use crate::core::ItemId;
use crate::tools::SharedHighlighter;

impl GrabberStateMachine {
    /// Wechselt die Hervorhebung auf `candidate`.
    ///
    /// Kein Effekt, solange etwas angeheftet ist oder `candidate` bereits
    /// hervorgehoben ist. Das alte Objekt wird zuerst ausgeblendet, und zwar
    /// mit dem Highlighter, der es eingeblendet hat.
    pub(crate) fn update_highlight(&mut self, candidate: Option<ItemId>) {
        if self.is_attached() || candidate == self.intersection.highlighted {
            return;
        }

        if let (Some(old), Some(hl)) = (
            self.intersection.highlighted,
            self.intersection.highlighted_by.as_ref(),
        ) {
            self.hide_highlight(hl, old);
        }

        let shown_by = candidate.and_then(|item| {
            let hl = self
                .registry
                .resolve_highlighter(item, self.highlighter.as_ref())?;
            self.show_highlight(&hl, item);
            Some(hl)
        });

        self.intersection.highlighted = candidate;
        self.intersection.highlighted_by = shown_by;
    }

    /// Blendet die aktuelle Hervorhebung aus (beim Greifen).
    pub(crate) fn suspend_highlight(&mut self) {
        let Some(item) = self.intersection.highlighted.take() else {
            return;
        };
        if let Some(hl) = self.intersection.highlighted_by.take() {
            self.hide_highlight(&hl, item);
        }
    }

    pub(crate) fn hide_highlight(&self, hl: &SharedHighlighter, item: ItemId) {
        let mut hl = hl.borrow_mut();
        if self.settings.pre_load_highlights {
            hl.set_visible(item, false);
        } else {
            hl.remove(item);
        }
    }

    fn show_highlight(&self, hl: &SharedHighlighter, item: ItemId) {
        let mut hl = hl.borrow_mut();
        if self.settings.pre_load_highlights {
            hl.set_visible(item, true);
        } else {
            hl.add(item);
        }
    }
}
