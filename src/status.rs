//! Unified API status codes and translation from the daemon-side error
//! enumerations.
//!
//! The daemon reports errors through four independent enumerations: the core
//! interface, the device policy manager, the telephony/audio service and the
//! AVRCP/media service. Each one translates into the single [`BtStatus`]
//! enum here; the tables are pure data and carry no state. Raw codes that are
//! not listed translate to [`BtStatus::OperationFailed`].

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::cast::FromPrimitive;

/// Status codes surfaced to API consumers.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BtStatus {
    None = 0,
    Cancelled,
    InvalidParameter,
    OutOfMemory,
    ResourceBusy,
    TimedOut,
    NowInProgress,
    NotInProgress,
    NotInitialized,
    NotEnabled,
    AlreadyDone,
    OperationFailed,
    RemoteDeviceNotBonded,
    RemoteDeviceNotConnected,
    RemoteDeviceNotFound,
    AuthRejected,
    AuthFailed,
    ServiceSearchFailed,
    ServiceNotFound,
    PermissionDenied,
    QuotaExceeded,
    NotSupported,
}

/// Error codes reported by the core daemon interface.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(i32)]
pub enum DaemonStatus {
    Success = 0,
    Cancel,
    InvalidParam,
    InvalidData,
    MemoryAllocation,
    Timeout,
    NotInOperation,
    CancelByUser,
    RegistrationFailed,
    InProgress,
    NotFound,
    NotConnected,
    AlreadyConnected,
    ConnectionBusy,
    NotEnabled,
    AlreadyInitialized,
    NotInitialized,
    NotPaired,
    ServiceSearchError,
    AccessDenied,
    MaxClient,
    NotSupported,
    InternalError,
}

impl From<DaemonStatus> for BtStatus {
    fn from(item: DaemonStatus) -> Self {
        match item {
            DaemonStatus::Success => BtStatus::None,
            DaemonStatus::Cancel | DaemonStatus::CancelByUser => BtStatus::Cancelled,
            DaemonStatus::InvalidParam | DaemonStatus::InvalidData => BtStatus::InvalidParameter,
            DaemonStatus::MemoryAllocation => BtStatus::OutOfMemory,
            DaemonStatus::Timeout => BtStatus::TimedOut,
            DaemonStatus::NotInOperation => BtStatus::NotInProgress,
            DaemonStatus::InProgress | DaemonStatus::ConnectionBusy => BtStatus::NowInProgress,
            DaemonStatus::NotFound => BtStatus::RemoteDeviceNotFound,
            DaemonStatus::NotConnected => BtStatus::RemoteDeviceNotConnected,
            DaemonStatus::AlreadyConnected | DaemonStatus::AlreadyInitialized => {
                BtStatus::AlreadyDone
            }
            DaemonStatus::NotEnabled => BtStatus::NotEnabled,
            DaemonStatus::NotInitialized => BtStatus::NotInitialized,
            DaemonStatus::NotPaired => BtStatus::RemoteDeviceNotBonded,
            DaemonStatus::ServiceSearchError => BtStatus::ServiceSearchFailed,
            DaemonStatus::AccessDenied => BtStatus::PermissionDenied,
            DaemonStatus::MaxClient => BtStatus::ResourceBusy,
            DaemonStatus::NotSupported => BtStatus::NotSupported,
            DaemonStatus::RegistrationFailed | DaemonStatus::InternalError => {
                BtStatus::OperationFailed
            }
        }
    }
}

impl BtStatus {
    /// Translates a raw core daemon code. Values outside the known table map
    /// to `OperationFailed`.
    pub fn from_daemon_code(code: i32) -> BtStatus {
        DaemonStatus::from_i32(code).map(BtStatus::from).unwrap_or(BtStatus::OperationFailed)
    }
}

/// Converts a core daemon return into the facade result shape.
pub fn to_result(status: DaemonStatus) -> Result<(), BtStatus> {
    match BtStatus::from(status) {
        BtStatus::None => Ok(()),
        err => Err(err),
    }
}

/// Error codes reported by the device policy manager.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(i32)]
pub enum DpmStatus {
    Allowed = 0,
    Restricted,
    NotPermitted,
    Unsupported,
    ProfileOff,
    Fail,
}

impl From<DpmStatus> for BtStatus {
    fn from(item: DpmStatus) -> Self {
        match item {
            DpmStatus::Allowed => BtStatus::None,
            DpmStatus::Restricted | DpmStatus::NotPermitted => BtStatus::PermissionDenied,
            DpmStatus::Unsupported => BtStatus::NotSupported,
            DpmStatus::ProfileOff => BtStatus::NotEnabled,
            DpmStatus::Fail => BtStatus::OperationFailed,
        }
    }
}

/// Error codes reported by the telephony/audio service.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(i32)]
pub enum TelephonyStatus {
    Success = 0,
    Fail,
    NotInitialized,
    NotEnabled,
    Busy,
    NoCallInProgress,
    AlreadyExists,
    NotConnected,
    InvalidParam,
    NotAvailable,
}

impl From<TelephonyStatus> for BtStatus {
    fn from(item: TelephonyStatus) -> Self {
        match item {
            TelephonyStatus::Success => BtStatus::None,
            TelephonyStatus::Fail => BtStatus::OperationFailed,
            TelephonyStatus::NotInitialized => BtStatus::NotInitialized,
            TelephonyStatus::NotEnabled => BtStatus::NotEnabled,
            TelephonyStatus::Busy => BtStatus::ResourceBusy,
            TelephonyStatus::NoCallInProgress => BtStatus::NotInProgress,
            TelephonyStatus::AlreadyExists => BtStatus::AlreadyDone,
            TelephonyStatus::NotConnected => BtStatus::RemoteDeviceNotConnected,
            TelephonyStatus::InvalidParam => BtStatus::InvalidParameter,
            TelephonyStatus::NotAvailable => BtStatus::NotSupported,
        }
    }
}

/// Error codes reported by the AVRCP/media service.
#[derive(Clone, Copy, Debug, FromPrimitive, ToPrimitive, PartialEq, Eq)]
#[repr(i32)]
pub enum AvrcpStatus {
    Success = 0,
    Fail,
    Timeout,
    InvalidParam,
    NotSupported,
    InternalError,
}

impl From<AvrcpStatus> for BtStatus {
    fn from(item: AvrcpStatus) -> Self {
        match item {
            AvrcpStatus::Success => BtStatus::None,
            AvrcpStatus::Fail | AvrcpStatus::InternalError => BtStatus::OperationFailed,
            AvrcpStatus::Timeout => BtStatus::TimedOut,
            AvrcpStatus::InvalidParam => BtStatus::InvalidParameter,
            AvrcpStatus::NotSupported => BtStatus::NotSupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daemon_success_is_none() {
        assert_eq!(BtStatus::from(DaemonStatus::Success), BtStatus::None);
        assert!(to_result(DaemonStatus::Success).is_ok());
    }

    #[test]
    fn daemon_failures_translate() {
        assert_eq!(BtStatus::from(DaemonStatus::NotPaired), BtStatus::RemoteDeviceNotBonded);
        assert_eq!(BtStatus::from(DaemonStatus::ServiceSearchError), BtStatus::ServiceSearchFailed);
        assert_eq!(to_result(DaemonStatus::Timeout), Err(BtStatus::TimedOut));
    }

    #[test]
    fn unknown_daemon_code_defaults() {
        assert_eq!(BtStatus::from_daemon_code(0x7fff), BtStatus::OperationFailed);
        assert_eq!(BtStatus::from_daemon_code(-1), BtStatus::OperationFailed);
    }

    #[test]
    fn dpm_translates() {
        assert_eq!(BtStatus::from(DpmStatus::Allowed), BtStatus::None);
        assert_eq!(BtStatus::from(DpmStatus::Restricted), BtStatus::PermissionDenied);
        assert_eq!(BtStatus::from(DpmStatus::ProfileOff), BtStatus::NotEnabled);
    }

    #[test]
    fn telephony_translates() {
        assert_eq!(BtStatus::from(TelephonyStatus::NoCallInProgress), BtStatus::NotInProgress);
        assert_eq!(BtStatus::from(TelephonyStatus::Busy), BtStatus::ResourceBusy);
    }

    #[test]
    fn avrcp_translates() {
        assert_eq!(BtStatus::from(AvrcpStatus::Success), BtStatus::None);
        assert_eq!(BtStatus::from(AvrcpStatus::Timeout), BtStatus::TimedOut);
    }
}
