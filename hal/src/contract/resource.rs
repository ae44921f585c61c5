use std::any::Any;

use error_stack::ResultExt;
use serde::Serialize;
use serde_json::Value;

use super::{Contract, Member};
use crate::error::{Error, Result};
use crate::type_key::TypeKey;

/// Describes how a native type is shaped once serialized
///
/// Implemented by hand or with `#[derive(HalContract)]`. Implementations must agree
/// with the type's `Serialize` implementation: members are listed in the order the
/// serializer writes them, under the names it writes them with.
pub trait HalContract {
    /// Shape of this value
    fn contract(&self) -> Contract<'_>;

    /// Object-shaped view of this value
    ///
    /// For object-like types this is the member list of [`contract`](Self::contract).
    /// Array-like collection types that carry extra members (a total count, paging
    /// cursors) override this so those members can be hoisted onto the wrapping
    /// resource. Types overriding this must not build `contract` from it through the
    /// default, or the two calls recurse into each other.
    fn members(&self) -> Vec<Member<'_>> {
        match self.contract() {
            Contract::Object(members) => members,
            Contract::Array(_)
            | Contract::Dictionary(_)
            | Contract::Transparent(_)
            | Contract::Scalar => Vec::new(),
        }
    }
}

/// Object-safe view of a serializable native value
///
/// Blanket-implemented for every `HalContract + Serialize + 'static` type; the walker
/// only ever handles `&dyn Resource`.
pub trait Resource: Any {
    /// Shape of this value
    fn contract(&self) -> Contract<'_>;

    /// Object-shaped view of this value
    fn members(&self) -> Vec<Member<'_>>;

    /// Serialize this value to a generic JSON tree
    fn to_json(&self) -> Result<Value>;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Exact type of this value
    fn type_key(&self) -> TypeKey;
}

impl<T> Resource for T
where
    T: HalContract + Serialize + 'static,
{
    fn contract(&self) -> Contract<'_> {
        HalContract::contract(self)
    }

    fn members(&self) -> Vec<Member<'_>> {
        HalContract::members(self)
    }

    fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self)
            .change_context_lazy(|| Error::serialization_failed(std::any::type_name::<T>()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}
