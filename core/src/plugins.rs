use crate::{EventBus, Subscription};

/// What a plugin sees at install time. Subscriptions a plugin wants to keep
/// must be retained here; they are released when the owning
/// [`PluginHost`] is dropped.
pub struct PluginContext<'a> {
    pub events: &'a EventBus,
    retained: &'a mut Vec<Subscription>,
}

impl PluginContext<'_> {
    pub fn retain(&mut self, subscription: Subscription) {
        self.retained.push(subscription);
    }
}

pub trait EditorPlugin {
    fn install(&self, ctx: &mut PluginContext);
}

impl<F> EditorPlugin for F
where
    F: Fn(&mut PluginContext),
{
    fn install(&self, ctx: &mut PluginContext) {
        self(ctx)
    }
}

/// Owns the event subscriptions made by installed plugins so their
/// lifetime matches the host component's, not the garbage collector's.
#[derive(Default)]
pub struct PluginHost {
    retained: Vec<Subscription>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, events: &EventBus, plugin: &dyn EditorPlugin) {
        let mut ctx = PluginContext {
            events,
            retained: &mut self.retained,
        };
        plugin.install(&mut ctx);
    }

    pub fn subscription_count(&self) -> usize {
        self.retained.len()
    }
}
