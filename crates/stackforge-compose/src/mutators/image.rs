//! Image tag mutator.

use stackforge_common::constants::TAG_PLACEHOLDER;

use crate::interpolate::{InterpolationContext, resolve};
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Substitutes `options.tag` for `{tag}` in the image reference.
///
/// Returns `true` only if the image string actually changed.
pub fn apply(service: &mut ServiceDefinition, options: &ServiceOptions) -> bool {
    let (Some(image), Some(tag)) = (service.image.as_mut(), options.tag.as_deref()) else {
        return false;
    };
    let context = InterpolationContext::new().with(TAG_PLACEHOLDER, tag);
    let tagged = resolve(image, &context);
    if tagged == *image {
        return false;
    }
    *image = tagged;
    true
}
