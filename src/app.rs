//! Application state and core logic

use crate::state::{ContactForm, Form, FormField, SubmitStatus};
use chrono::Local;
use contact_form::{
    validate_and_render, validate_form, Debounce, ErrorMarks, FieldInput, FormConfig, FormInput,
    Scheduler, Throttle,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

type FieldDebounce<S> = Debounce<Box<dyn FnMut(FieldInput)>, S>;
type SubmitHandler<S> = Throttle<Box<dyn FnMut(FormInput)>, S>;

/// Work handed back by the rate-limited callbacks
#[derive(Debug, Default)]
struct Inbox {
    fields: Vec<FieldInput>,
    submissions: Vec<FormInput>,
}

/// Debounced live check for one field.
///
/// The trailing debouncer always settles on the latest value. With
/// `debounce_immediate` set, a leading debouncer also checks the first
/// keystroke of each burst so feedback starts right away.
struct LiveValidator<S: Scheduler> {
    leading: Option<FieldDebounce<S>>,
    trailing: FieldDebounce<S>,
}

impl<S: Scheduler> LiveValidator<S> {
    fn new(inbox: &Rc<RefCell<Inbox>>, config: &FormConfig, scheduler: S) -> Self
    where
        S: Clone,
    {
        let leading = config.debounce_immediate.then(|| {
            Debounce::new(
                record_field(inbox),
                config.debounce_wait(),
                true,
                scheduler.clone(),
            )
        });
        let trailing = Debounce::new(
            record_field(inbox),
            config.debounce_wait(),
            false,
            scheduler,
        );
        Self { leading, trailing }
    }

    fn call(&self, input: FieldInput) {
        if let Some(leading) = &self.leading {
            leading.call(input.clone());
        }
        self.trailing.call(input);
    }
}

fn record_field(inbox: &Rc<RefCell<Inbox>>) -> Box<dyn FnMut(FieldInput)> {
    let inbox = Rc::clone(inbox);
    Box::new(move |input| inbox.borrow_mut().fields.push(input))
}

/// Main application struct
pub struct App<S: Scheduler> {
    /// Editable contact form
    pub form: ContactForm,
    /// Per-field error state shown next to each input
    pub marks: ErrorMarks,
    /// Result of the last accepted submit
    pub submit_status: SubmitStatus,
    inbox: Rc<RefCell<Inbox>>,
    /// One debouncer per field so switching fields never drops a pending check
    live_validators: Vec<LiveValidator<S>>,
    submit: SubmitHandler<S>,
    /// Whether the app should quit
    quit: bool,
}

impl<S: Scheduler> App<S> {
    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether another submit would be accepted right now
    pub fn can_submit(&self) -> bool {
        self.submit.is_open()
    }
}

impl<S: Scheduler + Clone + 'static> App<S> {
    /// Create a new App instance
    pub fn new(config: &FormConfig, scheduler: S) -> Self {
        let inbox = Rc::new(RefCell::new(Inbox::default()));
        let form = ContactForm::new();

        let live_validators = (0..form.fields().len())
            .map(|_| LiveValidator::new(&inbox, config, scheduler.clone()))
            .collect();

        let submit_inbox = Rc::clone(&inbox);
        let record_submit: Box<dyn FnMut(FormInput)> =
            Box::new(move |input| submit_inbox.borrow_mut().submissions.push(input));
        let submit = Throttle::new(record_submit, config.throttle_interval(), scheduler);

        Self {
            form,
            marks: ErrorMarks::new(),
            submit_status: SubmitStatus::default(),
            inbox,
            live_validators,
            submit,
            quit: false,
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if ctrl => self.request_submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.validate_active_field();
                self.form.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.validate_active_field();
                self.form.prev_field();
            }
            KeyCode::Enter => {
                if self.form.is_submit_active() {
                    self.request_submit();
                } else if self.form.is_active_field_multiline() {
                    self.edit_active_field(|f| f.push_char('\n'));
                } else {
                    self.validate_active_field();
                    self.form.next_field();
                }
            }
            KeyCode::Backspace => self.edit_active_field(|f| f.pop_char()),
            KeyCode::Char(c) if !ctrl => self.edit_active_field(|f| f.push_char(c)),
            _ => {}
        }
        self.process_inbox();
    }

    /// Apply results queued by the rate-limited callbacks
    pub fn process_inbox(&mut self) {
        let Inbox {
            fields,
            submissions,
        } = std::mem::take(&mut *self.inbox.borrow_mut());

        for input in fields {
            let valid = validate_and_render(&input, &mut self.marks);
            tracing::trace!(field = %input.name, valid, "Live validation");
        }
        for input in submissions {
            self.finish_submit(&input);
        }
    }

    /// Edit the active field, then queue a debounced re-check of it
    fn edit_active_field(&mut self, edit: impl FnOnce(&mut FormField)) {
        let index = self.form.active_field();
        let Some(field) = self.form.get_active_field_mut() else {
            return;
        };
        edit(field);
        let input = field.to_input();
        if let Some(validator) = self.live_validators.get(index) {
            validator.call(input);
        }
    }

    /// Validate the field being left, as a blur handler would
    fn validate_active_field(&mut self) {
        if let Some(field) = self.form.get_field(self.form.active_field()) {
            validate_and_render(&field.to_input(), &mut self.marks);
        }
    }

    fn request_submit(&mut self) {
        if !self.submit.is_open() {
            tracing::debug!("Submit ignored, still inside throttle window");
        }
        self.submit.call(self.form.to_form_input());
    }

    fn finish_submit(&mut self, input: &FormInput) {
        let started = Instant::now();
        let errors = validate_form(input);
        tracing::debug!(
            elapsed_us = started.elapsed().as_micros() as u64,
            errors = errors.len(),
            "Form validated"
        );

        if errors.is_empty() {
            tracing::debug!("Contact form accepted");
            self.marks.clear_all();
            self.form.reset();
            self.submit_status = SubmitStatus::Accepted { at: Local::now() };
        } else {
            // Highlight each offending field as well as listing the errors
            for field in self.form.fields() {
                validate_and_render(&field.to_input(), &mut self.marks);
            }
            tracing::debug!(errors = errors.len(), "Contact form rejected");
            self.submit_status = SubmitStatus::Rejected(errors);
        }
    }
}

impl<S: Scheduler> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("form", &self.form)
            .field("marks", &self.marks)
            .field("submit_status", &self.submit_status)
            .finish_non_exhaustive()
    }
}
