//! Procedural macros for `hal_transform`

mod hal_contract;
mod serde_attrs;

use proc_macro::TokenStream;

/// Derives `HalContract` for a struct with named fields
///
/// Members are listed in field order under the names serde writes them with, so the
/// derive honours `#[serde(rename = "...")]`, container `#[serde(rename_all = "...")]`
/// and skips fields marked `#[serde(skip)]` or `#[serde(skip_serializing)]`.
///
/// # Example
///
/// ```ignore
/// #[derive(Serialize, HalContract)]
/// #[serde(rename_all = "camelCase")]
/// pub struct Widget {
///     pub id:         Uuid,
///     pub part_count: u32,
/// }
/// ```
///
/// This will generate:
///
/// ```ignore
/// impl HalContract for Widget {
///     fn contract(&self) -> Contract<'_> {
///         Contract::Object(<Self as HalContract>::members(self))
///     }
///
///     fn members(&self) -> Vec<Member<'_>> {
///         vec![
///             Member::renamed("id", "id", &self.id),
///             Member::renamed("part_count", "partCount", &self.part_count),
///         ]
///     }
/// }
/// ```
///
/// A collection type that serializes as the array of one of its fields names that
/// field with `#[hal(elements = "items")]`. Its contract is then the field's own
/// array-like contract, and its other members remain available for hoisting.
///
/// The attribute only describes the shape, it does not change serialization: the
/// type's `Serialize` must write that bare array, through `#[serde(transparent)]` or a
/// hand-written impl. A plainly derived struct serializes as an object, which the
/// walker reports as a shape mismatch and passes through untransformed.
///
/// On generic types every member field type is bounded by `Resource`, the way serde
/// bounds field types by `Serialize`.
#[proc_macro_derive(HalContract, attributes(hal))]
pub fn derive_hal_contract(input: TokenStream) -> TokenStream {
    hal_contract::derive_hal_contract_impl(input)
}
