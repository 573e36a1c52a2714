//! Tick-Locks: Anforderungen, die jeden Tick erneuert werden müssen.
//!
//! `requested` sammelt die Anforderungen des laufenden Ticks. Am Ende von
//! `finalize` wandern sie nach `frame_locked` und gelten damit im nächsten
//! Tick als "bereits gehalten"; nicht erneuerte Locks verfallen.

/// Bitmenge der Lock-Arten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockFlags(u8);

impl LockFlags {
    pub const NONE: LockFlags = LockFlags(0);
    /// Umschalten Greifen/Loslassen
    pub const TOGGLE: LockFlags = LockFlags(1);
    /// Greifen und Halten
    pub const HOLD: LockFlags = LockFlags(2);
    /// Schnitt-Test auf Anforderung
    pub const HOVER: LockFlags = LockFlags(4);

    pub fn contains(self, other: LockFlags) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: LockFlags) {
        self.0 |= other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Lock-Zustand eines Greifers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickLocks {
    requested: LockFlags,
    frame_locked: LockFlags,
}

impl TickLocks {
    /// Fordert einen Lock für den laufenden Tick an.
    pub fn request(&mut self, flag: LockFlags) {
        self.requested.insert(flag);
    }

    /// Wurde der Lock in diesem Tick angefordert?
    pub fn is_requested(&self, flag: LockFlags) -> bool {
        self.requested.contains(flag)
    }

    /// War der Lock im vorherigen Tick angefordert (Flanke bereits ausgelöst)?
    pub fn is_frame_locked(&self, flag: LockFlags) -> bool {
        self.frame_locked.contains(flag)
    }

    /// Schließt den Tick ab. Darf erst aufgerufen werden, nachdem alle
    /// Prüfungen des Ticks die Anforderungen gelesen haben.
    pub fn end_tick(&mut self) {
        self.frame_locked = self.requested;
        self.requested = LockFlags::NONE;
    }

    /// Verwirft alle Anforderungen und gehaltenen Locks.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
