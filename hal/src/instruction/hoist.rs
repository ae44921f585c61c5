use super::selector::MemberName;
use crate::contract::{Member, Resource};
use crate::error::Result;

/// Copies a member of a collection value onto the object wrapping the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistInstruction {
    name: MemberName,
}

impl HoistInstruction {
    /// Hoist the member read by `selector`
    pub fn new(selector: &str) -> Result<Self> {
        MemberName::parse(selector).map(|name| Self { name })
    }

    /// Native member name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The member within `main`, or `None` if its object view has no such member
    pub fn member<'a>(&self, main: &'a dyn Resource) -> Option<Member<'a>> {
        main.members()
            .into_iter()
            .find(|member| member.name() == self.name.as_str())
    }
}
