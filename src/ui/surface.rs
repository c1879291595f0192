use cursive::{CbSink, Cursive, View};

use crate::traits::ext::cursive::SivExt;

/// Handle to the cursive root a widget is drawn into.
///
/// Components never own the root; they post closures to it through the
/// callback sink, which cursive drains on its own thread.
#[derive(Clone)]
pub struct Surface {
    sink: CbSink,
}

impl Surface {
    pub fn new(sink: CbSink) -> Self {
        Self { sink }
    }

    pub fn call_on_name<V, F>(&self, name: &str, callback: F)
    where
        V: View,
        F: FnOnce(&mut V) + Send + 'static,
    {
        self.sink.call_on_name(name, callback);
    }

    pub fn send_box<F>(&self, callback: F)
    where
        F: FnOnce(&mut Cursive) + Send + 'static,
    {
        self.sink.send_box(callback);
    }

    pub fn same_as(&self, other: &Surface) -> bool {
        self.sink.same_channel(&other.sink)
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.sink.len()
    }
}

impl From<&Cursive> for Surface {
    fn from(siv: &Cursive) -> Self {
        Self::new(siv.cb_sink().clone())
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("pending", &self.sink.len())
            .finish()
    }
}
