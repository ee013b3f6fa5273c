//! Interface layer
//! 사용자 입력(CLI 인자/터미널 키 입력)을 유스케이스 호출로 연결한다.

pub mod cli;
