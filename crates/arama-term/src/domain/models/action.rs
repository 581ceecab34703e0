use super::Dispatch;

#[derive(Debug, Clone)]
pub enum Action {
    BackendHealthCheck,
    Dispatch(Dispatch),
}
