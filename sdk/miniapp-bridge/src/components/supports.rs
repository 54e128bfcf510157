use crate::capability;

use common::Version;

/// A public operation of a component, mapped to the wire commands backing it.
///
/// Several operations usually share one command (`show` and `hide` both need
/// `web_app_setup_back_button`), which is why capability is looked up per
/// command rather than per operation.
pub trait Operation: Copy {
    fn methods(self) -> &'static [&'static str];

    /// True when every command backing this operation is available at `version`.
    fn is_supported(self, version: Version) -> bool {
        self.methods()
            .iter()
            .all(|method| capability::is_supported(method, version))
    }
}
