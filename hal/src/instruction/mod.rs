//! Per-type transformation rules
//!
//! A registered type owns one [`TransformationInstructions`]: its link relations,
//! embeds, hoists and ignored members. The instructions are type-erased so the
//! repository can hold every registration in one map; typed construction goes through
//! [`TransformationMap`](crate::TransformationMap).

mod embed;
mod hoist;
mod link_instruction;
mod selector;

pub use embed::{EmbedIndex, EmbedInstruction};
pub use hoist::HoistInstruction;
pub use link_instruction::{
    ElementLinkInstruction, LinkInstruction, ManyLinkInstruction, SingleLinkInstruction,
};
pub use selector::MemberName;

use crate::type_key::TypeKey;

/// The rules registered for one native type
pub struct TransformationInstructions {
    type_key: TypeKey,
    links:    Vec<(String, Box<dyn LinkInstruction>)>,
    embeds:   Vec<EmbedInstruction>,
    hoists:   Vec<HoistInstruction>,
    ignores:  Vec<String>,
}

impl TransformationInstructions {
    /// No rules for the type identified by `type_key`
    pub fn new(type_key: TypeKey) -> Self {
        Self {
            type_key,
            links: Vec::new(),
            embeds: Vec::new(),
            hoists: Vec::new(),
            ignores: Vec::new(),
        }
    }

    /// Type the rules apply to
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Set the instruction for `relation`, replacing any earlier one in place
    pub fn set_link(&mut self, relation: impl Into<String>, instruction: Box<dyn LinkInstruction>) {
        let relation = relation.into();
        if let Some((_, existing)) = self.links.iter_mut().find(|(name, _)| *name == relation) {
            tracing::debug!(
                type_name = %self.type_key.short_name(),
                relation = %relation,
                "replacing link instruction"
            );
            *existing = instruction;
        } else {
            self.links.push((relation, instruction));
        }
    }

    /// Append an embed
    pub fn push_embed(&mut self, embed: EmbedInstruction) {
        self.embeds.push(embed);
    }

    /// Append a hoist
    pub fn push_hoist(&mut self, hoist: HoistInstruction) {
        self.hoists.push(hoist);
    }

    /// Append an ignored member by native name
    pub fn push_ignore(&mut self, member: impl Into<String>) {
        self.ignores.push(member.into());
    }

    /// Link instructions by relation, in registration order
    pub fn links(&self) -> impl Iterator<Item = (&str, &dyn LinkInstruction)> {
        self.links
            .iter()
            .map(|(relation, instruction)| (relation.as_str(), instruction.as_ref()))
    }

    /// Embeds in registration order
    pub fn embeds(&self) -> &[EmbedInstruction] {
        &self.embeds
    }

    /// Hoists in registration order
    pub fn hoists(&self) -> &[HoistInstruction] {
        &self.hoists
    }

    /// Ignored native member names in registration order
    pub fn ignores(&self) -> &[String] {
        &self.ignores
    }
}

impl std::fmt::Debug for TransformationInstructions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformationInstructions")
            .field("type_key", &self.type_key)
            .field(
                "links",
                &self.links.iter().map(|(relation, _)| relation).collect::<Vec<_>>(),
            )
            .field("embeds", &self.embeds)
            .field("hoists", &self.hoists)
            .field("ignores", &self.ignores)
            .finish()
    }
}
