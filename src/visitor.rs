//! Double-dispatch interface for consuming primitives.
//!
//! A visitor implementation is supplied by the downstream layer (a wire
//! serializer, a simulator bridge, a firmware encoder) and handles every
//! variant of the closed [`crate::Primitive`] set. Dispatch happens through
//! [`crate::Primitive::accept`], so consumers act on the concrete variant
//! without inspecting it, and a newly added variant fails to compile until
//! every visitor grows a handler for it.

use crate::primitive::{Catch, Chip, DirectVelocity, DirectWheels, Kick, Move, MoveSpin, Pivot};

/// One operation per primitive variant.
///
/// All methods are required: the variant set is closed, and exhaustiveness is
/// the point of the trait.
pub trait PrimitiveVisitor {
    /// Acts on a [`DirectWheels`] primitive.
    fn visit_direct_wheels(&mut self, primitive: &DirectWheels);

    /// Acts on a [`DirectVelocity`] primitive.
    fn visit_direct_velocity(&mut self, primitive: &DirectVelocity);

    /// Acts on a [`Pivot`] primitive.
    fn visit_pivot(&mut self, primitive: &Pivot);

    /// Acts on a [`Move`] primitive.
    fn visit_move(&mut self, primitive: &Move);

    /// Acts on a [`MoveSpin`] primitive.
    fn visit_move_spin(&mut self, primitive: &MoveSpin);

    /// Acts on a [`Kick`] primitive.
    fn visit_kick(&mut self, primitive: &Kick);

    /// Acts on a [`Chip`] primitive.
    fn visit_chip(&mut self, primitive: &Chip);

    /// Acts on a [`Catch`] primitive.
    fn visit_catch(&mut self, primitive: &Catch);
}
