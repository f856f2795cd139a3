//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// Generational key into the [`World`](super::World) entity table. A stale
    /// key (its entity destroyed) never aliases a newer entity.
    pub struct Entity;
}
