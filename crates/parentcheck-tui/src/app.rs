use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use parentcheck_config::Endpoints;
use parentcheck_core::ViewState;
use ratatui::layout::{Position, Rect};

use crate::actions::Action;
use crate::toast::Toasts;
use crate::ui;
use crate::util::apply_text_input;
use crate::worker::{ApiEvent, Pending, RequestKind};

const INSPECTOR_PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Email,
    Check,
    ClearData,
    Inspector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmFocus {
    Cancel,
    Confirm,
}

impl ConfirmFocus {
    fn toggle(self) -> Self {
        match self {
            ConfirmFocus::Cancel => ConfirmFocus::Confirm,
            ConfirmFocus::Confirm => ConfirmFocus::Cancel,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub view: ViewState,
    pub toasts: Toasts,
    pub endpoints: Endpoints,
    pub focus: Focus,
    pub confirm_focus: ConfirmFocus,
    pub show_help: bool,
    pub should_quit: bool,
    pub inspector_scroll: u16,
    pub(crate) last_area: Rect,
    actions: VecDeque<Action>,
    pending: Option<Pending>,
}

impl App {
    pub fn new(endpoints: Endpoints, toasts: Toasts) -> Self {
        Self {
            view: ViewState::new(),
            toasts,
            endpoints,
            focus: Focus::Email,
            confirm_focus: ConfirmFocus::Cancel,
            show_help: false,
            should_quit: false,
            inspector_scroll: 0,
            last_area: Rect::default(),
            actions: VecDeque::new(),
            pending: None,
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_pending(&mut self, pending: Pending) {
        self.pending = Some(pending);
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Delivers a finished worker's reply to the controller.
    pub fn poll_pending(&mut self) {
        let Some(event) = self.pending.as_ref().and_then(Pending::poll) else {
            return;
        };
        self.pending = None;
        self.apply_event(event);
    }

    fn apply_event(&mut self, event: ApiEvent) {
        match event.kind {
            RequestKind::Lookup => self.view.complete_lookup(event.result, &mut self.toasts),
            RequestKind::Clear => self.view.complete_clear(event.result, &mut self.toasts),
        }
        self.inspector_scroll = 0;
        self.sync_focus();
    }

    /// Moves focus off controls that are no longer rendered.
    pub fn sync_focus(&mut self) {
        let available = self.focus_ring();
        if !available.contains(&self.focus) {
            self.focus = Focus::Email;
        }
    }

    fn focus_ring(&self) -> Vec<Focus> {
        let mut ring = vec![Focus::Email, Focus::Check];
        if self.view.parent_id().is_some() {
            ring.push(Focus::ClearData);
        }
        if self.view.raw_response().is_some() {
            ring.push(Focus::Inspector);
        }
        ring
    }

    fn cycle_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % ring.len()
        } else {
            (current + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('x') => {
                    self.toasts.dismiss_newest();
                    return;
                }
                _ => {}
            }
        }

        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if matches!(key.code, KeyCode::F(1)) {
            self.show_help = true;
            return;
        }

        if self.view.gate().is_visible() {
            self.handle_confirm_key(key);
            return;
        }

        match key.code {
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            _ => match self.focus {
                Focus::Email => self.handle_email_key(key),
                Focus::Check => self.handle_check_key(key),
                Focus::ClearData => self.handle_clear_data_key(key),
                Focus::Inspector => self.handle_inspector_key(key),
            },
        }
    }

    fn handle_email_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_lookup(),
            _ => {
                self.view.edit_email(|text| {
                    apply_text_input(text, key);
                });
            }
        }
    }

    fn handle_check_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_lookup(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_clear_data_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('d') => self.request_clear(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_inspector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.view.toggle_inspector() {
                    self.inspector_scroll = 0;
                }
            }
            KeyCode::Down | KeyCode::Char('j') if self.view.is_inspector_open() => {
                self.inspector_scroll = self.inspector_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') if self.view.is_inspector_open() => {
                self.inspector_scroll = self.inspector_scroll.saturating_sub(1);
            }
            KeyCode::PageDown if self.view.is_inspector_open() => {
                self.inspector_scroll = self.inspector_scroll.saturating_add(INSPECTOR_PAGE);
            }
            KeyCode::PageUp if self.view.is_inspector_open() => {
                self.inspector_scroll = self.inspector_scroll.saturating_sub(INSPECTOR_PAGE);
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_clear(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.view.cancel_clear();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.confirm_focus = self.confirm_focus.toggle();
            }
            KeyCode::Enter => match self.confirm_focus {
                ConfirmFocus::Cancel => {
                    self.view.cancel_clear();
                }
                ConfirmFocus::Confirm => self.confirm_clear(),
            },
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);

        let toast_count = self.toasts.visible().count();
        if let Some(index) = (0..toast_count)
            .find(|index| ui::toast_rect(self.last_area, *index).contains(position))
        {
            self.toasts.dismiss(index);
            return;
        }

        if self.view.gate().is_visible() && !ui::confirm_rect(self.last_area).contains(position) {
            self.view.dismiss_clear();
        }
    }

    fn submit_lookup(&mut self) {
        if let Some(request) = self.view.submit_lookup(&mut self.toasts) {
            self.enqueue(Action::Lookup(request));
        }
        self.inspector_scroll = 0;
        self.sync_focus();
    }

    fn request_clear(&mut self) {
        if self.view.request_clear() {
            self.confirm_focus = ConfirmFocus::Cancel;
        }
    }

    fn confirm_clear(&mut self) {
        if let Some(request) = self.view.confirm_clear() {
            self.enqueue(Action::Clear(request));
        }
    }
}
