//! Shallow property merge.

use tracing::debug;

use oo_types::Object;

use crate::config::MergeOptions;

/// Copy enumerable properties from each source into `target`, in argument
/// order, and return `target` itself.
///
/// Later sources overwrite earlier ones on key collision. Values are copied
/// by reference: nested objects and functions are shared, not cloned.
/// With no sources this is a no-op.
pub fn merge(target: &Object, sources: &[&Object], options: &MergeOptions) -> Object {
    for source in sources {
        let mut copied = 0usize;
        for key in source.enumerable_keys(options.inherited_keys_included) {
            let value = source.get(&key);
            if options.skip_absent && value.is_undefined() {
                continue;
            }
            target.set(key, value);
            copied += 1;
        }
        debug!(
            copied,
            inherited = options.inherited_keys_included,
            "merged source properties"
        );
    }
    target.clone()
}

/// [`merge`] with default options.
pub fn extend(target: &Object, sources: &[&Object]) -> Object {
    merge(target, sources, &MergeOptions::default())
}
