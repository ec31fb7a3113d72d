//! Readiness and liveness probes.
//!
//! The server moves through three phases: `starting` until the socket is
//! bound and the record store is wired, `ready` while serving, and `draining`
//! once shutdown begins. Probes answer with the phase name and never cache.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not yet accepting traffic.
    Starting,
    /// Serving requests.
    Ready,
    /// Shutting down; no new traffic should arrive.
    Draining,
}

impl Phase {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Ready => 1,
            Self::Draining => 2,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Ready,
            _ => Self::Draining,
        }
    }
}

/// Probe response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    /// Current lifecycle phase.
    pub status: Phase,
}

/// Shared lifecycle phase for the probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Starting.to_u8()),
        }
    }
}

impl HealthState {
    /// Create a state in the `starting` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Enter the `ready` phase unless already draining.
    pub fn mark_ready(&self) {
        // A draining server never becomes ready again.
        let _ = self.phase.compare_exchange(
            Phase::Starting.to_u8(),
            Phase::Ready.to_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Enter the `draining` phase so both probes fail.
    pub fn mark_draining(&self) {
        self.phase.store(Phase::Draining.to_u8(), Ordering::Release);
    }

    /// Whether the readiness probe passes.
    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Whether the liveness probe passes.
    pub fn is_alive(&self) -> bool {
        self.phase() != Phase::Draining
    }

    fn respond(&self, passing: bool) -> HttpResponse {
        let mut builder = if passing {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeBody {
                status: self.phase(),
            })
    }
}

/// Readiness probe: 200 while serving, 503 while starting or draining.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving traffic", body = ProbeBody),
        (status = 503, description = "Starting or draining", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_ready())
}

/// Liveness probe: 200 until the server starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive", body = ProbeBody),
        (status = 503, description = "Draining", body = ProbeBody)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_alive())
}
