//! Form aggregate: five field controllers wired into a dependency graph.
//!
//! Each validator declares the fields it reads. When a value changes the form
//! re-runs the changed field and then every field downstream of it, each one
//! once, so the confirmation field follows live edits of the password.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use registration_sdk::{FieldId, NewRegistration, RegistrationInput};

use super::error::DomainError;
use super::field::FieldController;
use super::validators::{
    EmailFormat, FieldLookup, FieldValidator, MatchesField, PasswordStrength, Required,
};

#[derive(Debug)]
pub struct RegistrationForm {
    fields: Vec<FieldController>,
    /// upstream field -> fields whose validator reads it
    dependents: BTreeMap<FieldId, Vec<FieldId>>,
}

impl RegistrationForm {
    /// The standard registration form.
    #[must_use]
    pub fn standard(password_min_length: usize) -> Self {
        Self::assemble(standard_validators(password_min_length))
    }

    /// Build a form from one validator per field.
    ///
    /// # Errors
    /// Returns [`DomainError::FormDefinition`] when a field is missing or
    /// bound twice, or when the declared dependencies form a cycle.
    pub fn with_validators(
        validators: Vec<(FieldId, Arc<dyn FieldValidator>)>,
    ) -> Result<Self, DomainError> {
        let mut seen = BTreeSet::new();
        for (id, _) in &validators {
            if !seen.insert(*id) {
                return Err(DomainError::form_definition(format!(
                    "field '{id}' has more than one validator"
                )));
            }
        }
        if let Some(missing) = FieldId::ALL.into_iter().find(|id| !seen.contains(id)) {
            return Err(DomainError::form_definition(format!(
                "field '{missing}' has no validator"
            )));
        }

        let graph: BTreeMap<FieldId, Vec<FieldId>> = validators
            .iter()
            .map(|(id, v)| (*id, v.depends_on().to_vec()))
            .collect();
        if let Some(field) = find_cycle(&graph) {
            return Err(DomainError::form_definition(format!(
                "dependency cycle through field '{field}'"
            )));
        }

        Ok(Self::assemble(validators))
    }

    fn assemble(mut validators: Vec<(FieldId, Arc<dyn FieldValidator>)>) -> Self {
        validators.sort_by_key(|(id, _)| *id);

        let empty = RegistrationInput::default();
        let mut dependents: BTreeMap<FieldId, Vec<FieldId>> = BTreeMap::new();
        let fields = validators
            .into_iter()
            .map(|(id, validator)| {
                for upstream in validator.depends_on() {
                    dependents.entry(*upstream).or_default().push(id);
                }
                FieldController::new(id, validator, &empty)
            })
            .collect();

        Self { fields, dependents }
    }

    /// Update one field and re-validate everything that depends on it.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        let mut snapshot = self.input();
        snapshot.set(field, value.clone());

        if let Some(controller) = self.controller_mut(field) {
            controller.set_value(value, &snapshot);
        }
        for downstream in self.downstream_of(field) {
            if let Some(controller) = self.controller_mut(downstream) {
                controller.revalidate(&snapshot);
            }
        }
    }

    /// Set every field from a complete input, in form order.
    pub fn fill(&mut self, input: &RegistrationInput) {
        for id in FieldId::ALL {
            self.set(id, input.get(id));
        }
    }

    #[must_use]
    pub fn field(&self, id: FieldId) -> Option<&FieldController> {
        self.fields.iter().find(|f| f.id() == id)
    }

    /// Controllers in form order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldController> {
        self.fields.iter()
    }

    /// True iff every field is valid.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.fields.iter().all(FieldController::is_valid)
    }

    /// The first invalid field in form order and its displayed message.
    #[must_use]
    pub fn first_violation(&self) -> Option<(FieldId, &str)> {
        self.fields
            .iter()
            .find_map(|f| f.error_message().map(|message| (f.id(), message)))
    }

    /// Current values of all five fields.
    #[must_use]
    pub fn input(&self) -> RegistrationInput {
        let mut input = RegistrationInput::default();
        for field in &self.fields {
            input.set(field.id(), field.value().to_owned());
        }
        input
    }

    /// Request body built from the values current at call time.
    #[must_use]
    pub fn request_body(&self) -> NewRegistration {
        NewRegistration::from(&self.input())
    }

    fn controller_mut(&mut self, id: FieldId) -> Option<&mut FieldController> {
        self.fields.iter_mut().find(|f| f.id() == id)
    }

    /// Every field transitively downstream of `field`, each listed once.
    fn downstream_of(&self, field: FieldId) -> Vec<FieldId> {
        let mut visited = BTreeSet::from([field]);
        let mut queue = VecDeque::from([field]);
        let mut order = Vec::new();

        while let Some(current) = queue.pop_front() {
            for next in self.dependents.get(&current).into_iter().flatten() {
                if visited.insert(*next) {
                    order.push(*next);
                    queue.push_back(*next);
                }
            }
        }
        order
    }
}

impl FieldLookup for RegistrationForm {
    fn value_of(&self, field: FieldId) -> &str {
        self.field(field).map_or("", FieldController::value)
    }
}

fn standard_validators(password_min_length: usize) -> Vec<(FieldId, Arc<dyn FieldValidator>)> {
    vec![
        (FieldId::Name, Arc::new(Required::new(FieldId::Name))),
        (FieldId::Email, Arc::new(EmailFormat)),
        (
            FieldId::Password,
            Arc::new(PasswordStrength::new(password_min_length)),
        ),
        (
            FieldId::PasswordConfirmation,
            Arc::new(MatchesField::new(FieldId::Password)),
        ),
        (FieldId::AccessCode, Arc::new(Required::new(FieldId::AccessCode))),
    ]
}

/// Depth-first search for a back edge; returns a field on the cycle.
fn find_cycle(graph: &BTreeMap<FieldId, Vec<FieldId>>) -> Option<FieldId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Visiting,
        Done,
    }

    fn visit(
        node: FieldId,
        graph: &BTreeMap<FieldId, Vec<FieldId>>,
        marks: &mut BTreeMap<FieldId, Mark>,
    ) -> Option<FieldId> {
        match marks.get(&node) {
            Some(Mark::Visiting) => return Some(node),
            Some(Mark::Done) => return None,
            None => {}
        }
        marks.insert(node, Mark::Visiting);
        for upstream in graph.get(&node).into_iter().flatten() {
            if let Some(found) = visit(*upstream, graph, marks) {
                return Some(found);
            }
        }
        marks.insert(node, Mark::Done);
        None
    }

    let mut marks = BTreeMap::new();
    graph.keys().find_map(|node| visit(*node, graph, &mut marks))
}
