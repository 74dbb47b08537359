//! Pane handle
//!
//! A mounted pane. Creating it registers the pane with the container,
//! setters update the descriptor in place, and dropping it unregisters.

use tabset_panes::{DocumentPosition, PaneDescriptor, PaneIdentity, PaneName};

use crate::context::TabsContext;
use crate::Result;

/// Props a pane mounts with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneProps {
    pub name: Option<PaneName>,
    pub label: String,
    pub disabled: bool,
    pub closable: bool,
    pub lazy: bool,
}

impl PaneProps {
    pub fn named(name: impl Into<PaneName>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    fn into_descriptor(self, identity: PaneIdentity, position: DocumentPosition) -> PaneDescriptor {
        let mut descriptor = PaneDescriptor::new(identity)
            .with_label(self.label)
            .with_disabled(self.disabled)
            .with_closable(self.closable)
            .with_lazy(self.lazy)
            .at(position);
        descriptor.name = self.name;
        descriptor
    }
}

pub struct TabPane {
    identity: PaneIdentity,
    context: TabsContext,
}

impl TabPane {
    pub fn mount(context: &TabsContext, props: PaneProps, position: DocumentPosition) -> Self {
        let identity = PaneIdentity::new();
        context.register(identity, props.into_descriptor(identity, position));

        Self {
            identity,
            context: context.clone(),
        }
    }

    pub fn identity(&self) -> PaneIdentity {
        self.identity
    }

    pub fn descriptor(&self) -> Option<PaneDescriptor> {
        self.context.descriptor(self.identity)
    }

    pub fn set_name(&self, name: Option<PaneName>) -> Result<()> {
        self.context.update(self.identity, |pane| pane.name = name)?;
        Ok(())
    }

    pub fn set_label(&self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        self.context.update(self.identity, |pane| pane.label = label)?;
        Ok(())
    }

    pub fn set_disabled(&self, disabled: bool) -> Result<()> {
        self.context.update(self.identity, |pane| pane.disabled = disabled)?;
        Ok(())
    }

    pub fn set_closable(&self, closable: bool) -> Result<()> {
        self.context.update(self.identity, |pane| pane.closable = closable)?;
        Ok(())
    }

    pub fn set_lazy(&self, lazy: bool) -> Result<()> {
        self.context.update(self.identity, |pane| pane.lazy = lazy)?;
        Ok(())
    }

    /// The pane moved within the container's child structure.
    pub fn relocate(&self, position: DocumentPosition) -> Result<()> {
        self.context.update(self.identity, |pane| pane.position = position)?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.descriptor()
            .is_some_and(|pane| self.context.is_current(pane.name.as_ref()))
    }

    /// Lazy panes render nothing until they have been active once.
    pub fn should_render(&self) -> bool {
        match self.descriptor() {
            Some(pane) => !pane.lazy || pane.visited() || self.context.is_current(pane.name.as_ref()),
            None => false,
        }
    }
}

impl Drop for TabPane {
    fn drop(&mut self) {
        self.context.unregister(self.identity);
    }
}

impl std::fmt::Debug for TabPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabPane")
            .field("identity", &self.identity)
            .finish()
    }
}
