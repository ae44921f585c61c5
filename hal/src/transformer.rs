use crate::contract::Resource;
use crate::error::Result;
use crate::instruction::{EmbedInstruction, HoistInstruction, TransformationInstructions};
use crate::link::{LinkBuilders, LinkMap, UrlResolver};

/// The rules of one type bound to the link builders and URL resolver of a request
///
/// Created per lookup and dropped after the node is transformed.
pub struct TypeTransformer<'a> {
    instructions: &'a TransformationInstructions,
    builders:     &'a LinkBuilders,
    urls:         &'a dyn UrlResolver,
}

impl<'a> TypeTransformer<'a> {
    pub(crate) const fn new(
        instructions: &'a TransformationInstructions,
        builders: &'a LinkBuilders,
        urls: &'a dyn UrlResolver,
    ) -> Self {
        Self {
            instructions,
            builders,
            urls,
        }
    }

    /// Links of `value`, grouped by relation and cardinality
    ///
    /// A plural relation that produced no link is still reported, as an empty group.
    /// Fails when a link cannot be built, e.g. an endpoint link naming an unknown
    /// route.
    pub fn generate_links(&self, value: &dyn Resource) -> Result<LinkMap> {
        let mut links = LinkMap::default();

        for (relation, instruction) in self.instructions.links() {
            let singular = instruction.is_singular(value);
            for data in instruction.to_link_data(value) {
                let link = self.builders.build(&data, self.urls)?;
                links.push(relation, singular, link);
            }
            if !singular {
                links.entry(relation, false);
            }
        }

        Ok(links)
    }

    /// Embeds in registration order
    pub fn embeds(&self) -> &'a [EmbedInstruction] {
        self.instructions.embeds()
    }

    /// Hoists in registration order
    pub fn hoists(&self) -> &'a [HoistInstruction] {
        self.instructions.hoists()
    }

    /// Ignored native member names in registration order
    pub fn ignores(&self) -> &'a [String] {
        self.instructions.ignores()
    }

    /// Rules this transformer applies
    pub const fn instructions(&self) -> &'a TransformationInstructions {
        self.instructions
    }
}
