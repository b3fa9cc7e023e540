//! JNI bindings for the Android app.
//!
//! Each public function here corresponds to a `external fun` declaration
//! in RouteBridge.kt. The function names follow JNI naming conventions:
//! Java_<package>_<class>_<method> with dots replaced by underscores.
//!
//! A route preview lives behind an opaque `jlong` handle. The Kotlin view
//! drives it from its Choreographer callback by passing the frame time to
//! `frame`, and must call `dispose` when the view goes away.

use std::rc::Rc;

use jni::objects::{JClass, JString};
use jni::sys::{jdouble, jlong, jstring};
use jni::JNIEnv;
use log::{error, LevelFilter};

use crate::animator::{Animator, FrameClock, Snapshot};
use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::path::{Path, Position};
use crate::playback::Playback;
use crate::route::RoutePlan;
use crate::view::frame_route;

/// One route preview owned by the Kotlin side through a raw pointer.
pub struct RouteHandle {
    clock: Rc<FrameClock>,
    playback: Playback<GeoPoint, Rc<FrameClock>>,
    points: Vec<GeoPoint>,
}

impl std::fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandle")
            .field("clock", &self.clock)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

impl RouteHandle {
    pub fn from_json(plan_json: &str, config_json: Option<&str>) -> Result<Self> {
        let config = match config_json {
            Some(json) => AnimationConfig::from_json(json)?,
            None => AnimationConfig::map(),
        };
        let plan = RoutePlan::from_json(plan_json)?;
        let points = plan.animation_points(&config);

        let clock = Rc::new(FrameClock::default());
        let animator = Animator::for_plan(Path::build(&points), &plan, &config, Rc::clone(&clock));

        let mut playback = Playback::new();
        playback.load(animator);

        Ok(Self { clock, playback, points })
    }

    pub fn play(&mut self, now_ms: f64) {
        self.clock.set(now_ms);
        self.playback.play();
    }

    pub fn pause(&mut self, now_ms: f64) {
        self.clock.set(now_ms);
        self.playback.pause();
    }

    pub fn resume(&mut self, now_ms: f64) {
        self.clock.set(now_ms);
        self.playback.resume();
    }

    pub fn reset(&mut self) {
        self.playback.reset();
    }

    /// Snapshot for this display frame, or None when no frame was due.
    pub fn frame(&mut self, now_ms: f64) -> Option<Snapshot<Position>> {
        self.clock.set(now_ms);
        if !self.playback.on_frame() {
            return None;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Option<Snapshot<Position>> {
        self.playback.snapshot().map(Snapshot::tagged)
    }

    pub fn view_fit_json(&self) -> Result<String> {
        serde_json::to_string(&frame_route(&self.points)).map_err(Error::Serialize)
    }

    pub fn dispose(&mut self) {
        self.playback.cancel();
    }
}

fn snapshot_json(snapshot: Option<Snapshot<Position>>) -> Result<Option<String>> {
    snapshot
        .map(|s| serde_json::to_string(&s).map_err(Error::Serialize))
        .transpose()
}

fn new_jstring_or_null(env: &mut JNIEnv, value: Result<Option<String>>) -> jstring {
    let created = value.and_then(|v| match v {
        Some(s) => Ok(env.new_string(s)?.into_raw()),
        None => Ok(std::ptr::null_mut()),
    });
    match created {
        Ok(raw) => raw,
        Err(e) => {
            error!("{e}");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must be 0 or a value returned by `create` and not yet disposed.
unsafe fn handle_mut<'a>(handle: jlong) -> Option<&'a mut RouteHandle> {
    unsafe { (handle as *mut RouteHandle).as_mut() }
}

/// Returns the rust-core library version.
/// Maps to: RouteBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_version(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    new_jstring_or_null(&mut env, Ok(Some(crate::VERSION.to_string())))
}

/// Installs the logcat backend for the `log` facade.
/// Maps to: RouteBridge.init()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_init(_env: JNIEnv, _class: JClass) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("tourpath"),
    );
}

/// Builds a route preview from a route-plan JSON document.
/// Maps to: RouteBridge.create(planJson: String, configJson: String?) -> Long
///
/// Returns 0 and throws IllegalArgumentException if the input is invalid.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_create<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    plan_json: JString<'local>,
    config_json: JString<'local>,
) -> jlong {
    let created = (|| -> Result<RouteHandle> {
        let plan: String = env.get_string(&plan_json)?.into();
        let config: Option<String> = if config_json.is_null() {
            None
        } else {
            Some(env.get_string(&config_json)?.into())
        };
        RouteHandle::from_json(&plan, config.as_deref())
    })();

    match created {
        Ok(handle) => Box::into_raw(Box::new(handle)) as jlong,
        Err(e) => {
            error!("Failed to create route preview: {e}");
            if let Err(throw_err) = env.throw_new("java/lang/IllegalArgumentException", e.to_string()) {
                error!("Failed to throw IllegalArgumentException: {throw_err}");
            }
            0
        }
    }
}

/// Maps to: RouteBridge.play(handle: Long, nowMs: Double)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_play(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    now_ms: jdouble,
) {
    if let Some(h) = unsafe { handle_mut(handle) } {
        h.play(now_ms);
    }
}

/// Maps to: RouteBridge.pause(handle: Long, nowMs: Double)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_pause(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    now_ms: jdouble,
) {
    if let Some(h) = unsafe { handle_mut(handle) } {
        h.pause(now_ms);
    }
}

/// Maps to: RouteBridge.resume(handle: Long, nowMs: Double)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_resume(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
    now_ms: jdouble,
) {
    if let Some(h) = unsafe { handle_mut(handle) } {
        h.resume(now_ms);
    }
}

/// Maps to: RouteBridge.reset(handle: Long)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_reset(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if let Some(h) = unsafe { handle_mut(handle) } {
        h.reset();
    }
}

/// Advances the preview to the frame time and returns the snapshot as
/// JSON, or null when no frame was due.
/// Maps to: RouteBridge.frame(handle: Long, nowMs: Double) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_frame<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
    now_ms: jdouble,
) -> jstring {
    let snapshot = unsafe { handle_mut(handle) }.and_then(|h| h.frame(now_ms));
    new_jstring_or_null(&mut env, snapshot_json(snapshot))
}

/// Current snapshot as JSON without advancing time.
/// Maps to: RouteBridge.snapshot(handle: Long) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_snapshot<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) -> jstring {
    let snapshot = unsafe { handle_mut(handle) }.and_then(|h| h.snapshot());
    new_jstring_or_null(&mut env, snapshot_json(snapshot))
}

/// Camera framing for the route as JSON: the map fit under `map` and
/// the globe bounding circle under `globe`.
/// Maps to: RouteBridge.viewFit(handle: Long) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_viewFit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) -> jstring {
    let fit = unsafe { handle_mut(handle) }
        .map(|h| h.view_fit_json())
        .transpose();
    new_jstring_or_null(&mut env, fit)
}

/// Stops the frame loop and frees the handle. The handle must not be
/// used afterwards.
/// Maps to: RouteBridge.dispose(handle: Long)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_monastery360_app_RouteBridge_dispose(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle == 0 {
        return;
    }
    let mut boxed = unsafe { Box::from_raw(handle as *mut RouteHandle) };
    boxed.dispose();
}
