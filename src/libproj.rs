//! An engine over the PROJ C library, via `proj-sys`.
//!
//! Every system and transform shares one PROJ thread context, so values built
//! by a [`LibProjEngine`] must stay on the thread that created it.

use std::ffi::{self, CStr};
use std::ptr;
use std::rc::Rc;

use libc::{c_char, c_int};

use crate::engine::{
    CoordinateTransform, ReferenceSystem, ReferenceSystemEngine, render_definition,
};
use crate::{EngineError, ParameterSet};

/// PROJ thread context
struct ThreadContext(ptr::NonNull<proj_sys::PJ_CONTEXT>);

impl ThreadContext {
    fn new() -> Result<Self, EngineError> {
        let ctx_ptr = unsafe { proj_sys::proj_context_create() };
        ptr::NonNull::new(ctx_ptr)
            .map(ThreadContext)
            .ok_or_else(|| EngineError::new("PROJ could not allocate a thread context"))
    }

    fn as_ptr(&self) -> *mut proj_sys::PJ_CONTEXT {
        self.0.as_ptr()
    }

    /// The message for the context's current error number.
    fn last_error(&self) -> EngineError {
        let errno = unsafe { proj_sys::proj_context_errno(self.as_ptr()) };
        self.describe(errno)
    }

    fn describe(&self, errno: c_int) -> EngineError {
        let raw = unsafe { proj_sys::proj_context_errno_string(self.as_ptr(), errno) };
        match unsafe { string(raw) } {
            Some(message) => EngineError::new(message),
            None => EngineError::new(format!("PROJ error {errno}")),
        }
    }
}

impl Drop for ThreadContext {
    fn drop(&mut self) {
        // Safety: every `Pj` holds an `Rc` to its context, so none outlive it.
        unsafe { proj_sys::proj_context_destroy(self.as_ptr()) };
    }
}

/// # Safety
///
/// `raw` must be null or point to a nul-terminated string owned by PROJ.
unsafe fn string(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let c_str = unsafe { CStr::from_ptr(raw) };
    Some(c_str.to_string_lossy().into_owned())
}

/// A safe wrapper around `proj_sys::PJ`.
struct Pj {
    pj: ptr::NonNull<proj_sys::PJ>,
    ctx: Rc<ThreadContext>,
}

impl Pj {
    fn from_definition(ctx: Rc<ThreadContext>, definition: &str) -> Result<Self, EngineError> {
        let definition = ffi::CString::new(definition)
            .map_err(|e| EngineError::new(format!("nul byte in PROJ definition: {e}")))?;
        let pj_ptr = unsafe { proj_sys::proj_create(ctx.as_ptr(), definition.as_ptr()) };
        Pj::from_pj_ptr(ctx, pj_ptr)
    }

    /// A lon/lat-ordered, degree-based transformation between two CRS objects.
    fn crs_to_crs(source: &Pj, target: &Pj) -> Result<Self, EngineError> {
        let ctx = Rc::clone(&source.ctx);
        let pj_ptr = unsafe {
            proj_sys::proj_create_crs_to_crs_from_pj(
                ctx.as_ptr(),
                source.as_ptr(),
                target.as_ptr(),
                ptr::null_mut(),
                ptr::null(),
            )
        };
        let raw = Pj::from_pj_ptr(Rc::clone(&ctx), pj_ptr)?;
        let pj_ptr = unsafe { proj_sys::proj_normalize_for_visualization(ctx.as_ptr(), raw.as_ptr()) };
        Pj::from_pj_ptr(ctx, pj_ptr)
    }

    fn from_pj_ptr(ctx: Rc<ThreadContext>, pj_ptr: *mut proj_sys::PJ) -> Result<Self, EngineError> {
        match ptr::NonNull::new(pj_ptr) {
            Some(pj) => Ok(Pj { pj, ctx }),
            None => Err(ctx.last_error()),
        }
    }

    fn as_ptr(&self) -> *mut proj_sys::PJ {
        self.pj.as_ptr()
    }

    fn is_geographic_crs(&self) -> bool {
        let pj_type = unsafe { proj_sys::proj_get_type(self.as_ptr()) };
        pj_type == proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_2D_CRS
            || pj_type == proj_sys::PJ_TYPE_PJ_TYPE_GEOGRAPHIC_3D_CRS
    }

    fn trans(&self, x: f64, y: f64) -> Result<(f64, f64), EngineError> {
        let coord = proj_sys::PJ_COORD {
            v: [x, y, 0.0, 0.0],
        };
        let (out, errno) = unsafe {
            proj_sys::proj_errno_reset(self.as_ptr());
            let out = proj_sys::proj_trans(self.as_ptr(), proj_sys::PJ_DIRECTION_PJ_FWD, coord);
            (out.xy, proj_sys::proj_errno(self.as_ptr()))
        };
        if errno == 0 {
            Ok((out.x, out.y))
        } else {
            Err(self.ctx.describe(errno))
        }
    }
}

impl Drop for Pj {
    fn drop(&mut self) {
        unsafe {
            proj_sys::proj_destroy(self.as_ptr());
        }
    }
}

/// Builds reference systems with PROJ.
///
/// Each parameter set is handed to PROJ with `+type=crs`, so that PROJ treats
/// it as a coordinate reference system rather than a bare conversion.
pub struct LibProjEngine {
    ctx: Rc<ThreadContext>,
}

impl LibProjEngine {
    pub fn new() -> Result<Self, EngineError> {
        Ok(LibProjEngine {
            ctx: Rc::new(ThreadContext::new()?),
        })
    }
}

/// A reference system built by [`LibProjEngine`].
pub struct LibProjSystem {
    id: String,
    projection: String,
    geographic: bool,
    pj: Pj,
}

impl LibProjSystem {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl ReferenceSystem for LibProjSystem {
    fn is_geographic(&self) -> bool {
        self.geographic
    }

    fn projection_name(&self) -> &str {
        &self.projection
    }
}

/// A transform between two [`LibProjSystem`]s.
pub struct LibProjTransform {
    pj: Pj,
}

impl CoordinateTransform for LibProjTransform {
    fn apply(&self, coord: (f64, f64)) -> Result<(f64, f64), EngineError> {
        self.pj.trans(coord.0, coord.1)
    }
}

impl ReferenceSystemEngine for LibProjEngine {
    type System = LibProjSystem;
    type Transform<'a> = LibProjTransform;

    fn create_from_parameters(
        &self,
        id: &str,
        params: &ParameterSet,
    ) -> Result<LibProjSystem, EngineError> {
        let projection = params
            .get("proj")
            .ok_or_else(|| EngineError::new(format!("{id}: missing +proj")))?
            .to_string();
        let mut crs = params.clone();
        crs.insert("type", "crs");
        let pj = Pj::from_definition(Rc::clone(&self.ctx), &render_definition(&crs))
            .map_err(|e| EngineError::new(format!("{id}: {e}")))?;
        Ok(LibProjSystem {
            id: id.to_string(),
            projection,
            geographic: pj.is_geographic_crs(),
            pj,
        })
    }

    fn create_transform<'a>(
        &'a self,
        source: &'a LibProjSystem,
        dest: &'a LibProjSystem,
    ) -> Result<LibProjTransform, EngineError> {
        Ok(LibProjTransform {
            pj: Pj::crs_to_crs(&source.pj, &dest.pj)?,
        })
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{CrsFactory, ProjError};

    #[test]
    fn test_new_system() {
        let factory = CrsFactory::new(LibProjEngine::new().unwrap());
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84 +no_defs").unwrap();
        assert!(wgs84.is_geographic());
        assert_eq!(wgs84.projection_name(), "longlat");
        assert_eq!(wgs84.id(), "custom");
    }

    #[test]
    fn test_transform() {
        let factory = CrsFactory::new(LibProjEngine::new().unwrap());
        let wgs84 = factory.from_definition("+proj=longlat +datum=WGS84").unwrap();
        let merc = factory.from_definition("+proj=merc +datum=WGS84").unwrap();
        let p = factory.reproject_point(190.0, 0.0, &wgs84, &merc).unwrap();
        assert_relative_eq!(p.x, -18_924_313.434_856_5, epsilon = 1e-3);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejected_definition() {
        let factory = CrsFactory::new(LibProjEngine::new().unwrap());
        assert!(matches!(
            factory.from_definition("+proj=not_a_projection"),
            Err(ProjError::InvalidReferenceSystem(_))
        ));
    }
}
