lib::entry!(y2023::d01::solve, input = "d01.txt");
