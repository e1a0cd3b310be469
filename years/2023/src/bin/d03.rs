lib::entry!(y2023::d03::solve, input = "d03.txt");
